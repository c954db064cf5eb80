use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::excitement::{ExcitementRating, WeightProfile};
use crate::models::action_item::ActionItem;
use crate::models::process::{Process, ProcessDetail, ProcessStatus};
use crate::models::user::{NewUser, User};
use crate::store::{StoreError, TrackerStore};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    processes: HashMap<Uuid, Process>,
    action_items: HashMap<Uuid, ActionItem>,
}

impl Tables {
    fn owned_process(&self, user_id: Uuid, process_id: Uuid) -> Option<&Process> {
        self.processes
            .get(&process_id)
            .filter(|p| p.user_id == user_id)
    }

    fn owns_item(&self, user_id: Uuid, item_id: Uuid) -> bool {
        self.action_items
            .get(&item_id)
            .is_some_and(|item| self.owned_process(user_id, item.process_id).is_some())
    }

    fn detail(&self, process: &Process) -> ProcessDetail {
        let mut items: Vec<ActionItem> = self
            .action_items
            .values()
            .filter(|item| item.process_id == process.id)
            .cloned()
            .collect();
        items.sort_by(ActionItem::agenda_order);
        ProcessDetail::new(process.clone(), items)
    }
}

/// In-process store with the same ownership rules as `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[async_trait]
impl TrackerStore for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            excitement_weights: WeightProfile::default(),
            weights_customized: false,
            weight_setup_dismissed: false,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn save_weights(
        &self,
        user_id: Uuid,
        weights: &WeightProfile,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.get_mut(&user_id) else {
            return Ok(false);
        };
        user.excitement_weights = *weights;
        user.weights_customized = true;
        Ok(true)
    }

    async fn set_weight_setup_dismissed(
        &self,
        user_id: Uuid,
        dismissed: bool,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&user_id).map(|user| {
            user.weight_setup_dismissed = dismissed;
            user.clone()
        }))
    }

    async fn list_processes(
        &self,
        user_id: Uuid,
        status: Option<ProcessStatus>,
    ) -> Result<Vec<ProcessDetail>, StoreError> {
        let tables = self.tables.read().await;
        let mut processes: Vec<&Process> = tables
            .processes
            .values()
            .filter(|p| p.user_id == user_id)
            .filter(|p| status.map_or(true, |s| p.status == s))
            .collect();
        processes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(processes.into_iter().map(|p| tables.detail(p)).collect())
    }

    async fn find_process(
        &self,
        user_id: Uuid,
        process_id: Uuid,
    ) -> Result<Option<ProcessDetail>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .owned_process(user_id, process_id)
            .map(|p| tables.detail(p)))
    }

    async fn insert_process(&self, process: &Process) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.processes.insert(process.id, process.clone());
        Ok(())
    }

    async fn save_process(&self, process: &Process) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.processes.get_mut(&process.id) {
            Some(existing) if existing.user_id == process.user_id => {
                let rating = existing.excitement_rating.take();
                *existing = Process {
                    excitement_rating: rating,
                    ..process.clone()
                };
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_process(&self, user_id: Uuid, process_id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.owned_process(user_id, process_id).is_none() {
            return Ok(false);
        }
        tables.processes.remove(&process_id);
        tables
            .action_items
            .retain(|_, item| item.process_id != process_id);
        Ok(true)
    }

    async fn save_excitement_rating(
        &self,
        user_id: Uuid,
        process_id: Uuid,
        rating: &ExcitementRating,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.processes.get_mut(&process_id) {
            Some(process) if process.user_id == user_id => {
                process.excitement_rating = Some(rating.clone());
                process.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_action_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ActionItem>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.owns_item(user_id, item_id) {
            return Ok(None);
        }
        Ok(tables.action_items.get(&item_id).cloned())
    }

    async fn insert_action_item(
        &self,
        user_id: Uuid,
        item: &ActionItem,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.owned_process(user_id, item.process_id).is_none() {
            return Ok(false);
        }
        tables.action_items.insert(item.id, item.clone());
        Ok(true)
    }

    async fn save_action_item(&self, user_id: Uuid, item: &ActionItem) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_item(user_id, item.id) {
            return Ok(false);
        }
        let Some(existing) = tables.action_items.get_mut(&item.id) else {
            return Ok(false);
        };
        // The parent never moves.
        *existing = ActionItem {
            process_id: existing.process_id,
            ..item.clone()
        };
        Ok(true)
    }

    async fn delete_action_item(&self, user_id: Uuid, item_id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_item(user_id, item_id) {
            return Ok(false);
        }
        tables.action_items.remove(&item_id);
        Ok(true)
    }
}
