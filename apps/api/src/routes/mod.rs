pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::action_items::handlers as action_items;
use crate::auth::handlers as auth;
use crate::excitement::handlers as excitement;
use crate::processes::handlers as processes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Accounts
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/profile", get(auth::handle_profile))
        .route("/api/auth/preferences", put(auth::handle_update_preferences))
        // Excitement weights
        .route(
            "/api/excitement/categories",
            get(excitement::handle_list_categories),
        )
        .route(
            "/api/auth/excitement-weights",
            get(excitement::handle_get_weights).put(excitement::handle_update_weights),
        )
        .route(
            "/api/auth/excitement-weights/ranking",
            put(excitement::handle_update_ranking),
        )
        .route(
            "/api/auth/excitement-weights/move",
            put(excitement::handle_move_category),
        )
        // Recruitment processes
        .route(
            "/api/processes",
            get(processes::handle_list_processes).post(processes::handle_create_process),
        )
        .route(
            "/api/processes/summary",
            get(processes::handle_process_summary),
        )
        .route(
            "/api/processes/:id",
            get(processes::handle_get_process)
                .put(processes::handle_update_process)
                .delete(processes::handle_delete_process),
        )
        .route(
            "/api/processes/:id/excitement",
            put(excitement::handle_rate_process),
        )
        // Action items
        .route(
            "/api/action-items",
            post(action_items::handle_create_action_item),
        )
        .route(
            "/api/action-items/:id",
            put(action_items::handle_update_action_item)
                .delete(action_items::handle_delete_action_item),
        )
        .with_state(state)
}
