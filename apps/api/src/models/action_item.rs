use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{double_option, require_text, BlankField};

/// A follow-up task attached to a recruitment process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: Uuid,
    pub process_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
impl ActionItem {
    /// Due date ascending, undated items last, then creation order. The
    /// Postgres store orders the same way in SQL.
    pub fn agenda_order(a: &ActionItem, b: &ActionItem) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then(a.created_at.cmp(&b.created_at))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActionItem {
    pub process_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

impl NewActionItem {
    pub fn into_item(self, now: DateTime<Utc>) -> Result<ActionItem, BlankField> {
        Ok(ActionItem {
            id: Uuid::new_v4(),
            process_id: self.process_id,
            title: require_text("title", &self.title)?,
            description: self.description,
            due_date: self.due_date,
            completed: self.completed,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update; the parent process cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub completed: Option<bool>,
}

impl ActionItemUpdate {
    pub fn apply(self, item: &mut ActionItem, now: DateTime<Utc>) -> Result<(), BlankField> {
        if let Some(title) = self.title {
            item.title = require_text("title", &title)?;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(due_date) = self.due_date {
            item.due_date = due_date;
        }
        if let Some(completed) = self.completed {
            item.completed = completed;
        }
        item.updated_at = now;
        Ok(())
    }
}
