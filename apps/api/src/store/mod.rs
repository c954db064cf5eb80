//! Persistence seam.
//!
//! Handlers and services talk to `TrackerStore` only. Every method that
//! touches a process or action item is scoped by the owning user id, so a
//! record owned by someone else looks exactly like a missing one.
//!
//! `PgStore` is the production backend. `MemoryStore` backs the tests.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::excitement::{ExcitementRating, WeightProfile};
use crate::models::action_item::ActionItem;
use crate::models::process::{Process, ProcessDetail, ProcessStatus};
use crate::models::user::{NewUser, User};

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait TrackerStore: Send + Sync {
    // ── Users ───────────────────────────────────────────────────────────────

    /// Inserts a user holding the default weight profile.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StoreError>;

    /// `email` must already be normalized.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Replaces the whole profile and marks it customized.
    /// Returns false when the user does not exist.
    async fn save_weights(&self, user_id: Uuid, weights: &WeightProfile)
        -> Result<bool, StoreError>;

    async fn set_weight_setup_dismissed(
        &self,
        user_id: Uuid,
        dismissed: bool,
    ) -> Result<Option<User>, StoreError>;

    // ── Recruitment processes ───────────────────────────────────────────────

    /// Most recently updated first, each with its action items.
    async fn list_processes(
        &self,
        user_id: Uuid,
        status: Option<ProcessStatus>,
    ) -> Result<Vec<ProcessDetail>, StoreError>;

    async fn find_process(
        &self,
        user_id: Uuid,
        process_id: Uuid,
    ) -> Result<Option<ProcessDetail>, StoreError>;

    async fn insert_process(&self, process: &Process) -> Result<(), StoreError>;

    /// Overwrites the editable columns of an owned process. The excitement
    /// rating is left untouched. Returns false when not owned by
    /// `process.user_id`.
    async fn save_process(&self, process: &Process) -> Result<bool, StoreError>;

    /// Deletes the process with its action items and rating.
    async fn delete_process(&self, user_id: Uuid, process_id: Uuid) -> Result<bool, StoreError>;

    /// Replaces the rating of an owned process in a single write.
    async fn save_excitement_rating(
        &self,
        user_id: Uuid,
        process_id: Uuid,
        rating: &ExcitementRating,
    ) -> Result<bool, StoreError>;

    // ── Action items ────────────────────────────────────────────────────────

    async fn find_action_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ActionItem>, StoreError>;

    /// Inserts only if the parent process belongs to `user_id`.
    async fn insert_action_item(&self, user_id: Uuid, item: &ActionItem)
        -> Result<bool, StoreError>;

    async fn save_action_item(&self, user_id: Uuid, item: &ActionItem) -> Result<bool, StoreError>;

    async fn delete_action_item(&self, user_id: Uuid, item_id: Uuid) -> Result<bool, StoreError>;
}
