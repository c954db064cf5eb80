use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::excitement::{ExcitementRating, WeightProfile};
use crate::models::action_item::ActionItem;
use crate::models::process::{Process, ProcessDetail, ProcessStatus};
use crate::models::user::{NewUser, User};
use crate::store::{StoreError, TrackerStore};

/// PostgreSQL-backed store. Weights and ratings live in JSONB columns and are
/// decoded into their value objects as rows are read.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn action_items_for(
        &self,
        process_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ActionItem>>, StoreError> {
        let rows = sqlx::query_as::<_, ActionItemRow>(
            r#"
            SELECT * FROM action_items
            WHERE process_id = ANY($1)
            ORDER BY due_date ASC NULLS LAST, created_at ASC
            "#,
        )
        .bind(process_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<ActionItem>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.process_id)
                .or_default()
                .push(ActionItem::from(row));
        }
        Ok(grouped)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Row types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    excitement_weights: Option<Json<WeightProfile>>,
    weights_customized: bool,
    weight_setup_dismissed: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            // NULL predates implicit defaults on registration.
            excitement_weights: row.excitement_weights.map(|w| w.0).unwrap_or_default(),
            weights_customized: row.weights_customized,
            weight_setup_dismissed: row.weight_setup_dismissed,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProcessRow {
    id: Uuid,
    user_id: Uuid,
    company_name: String,
    position: String,
    status: String,
    contact_name: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    location: Option<String>,
    job_type: Option<String>,
    source: Option<String>,
    notes: Option<String>,
    rejection_reason: Option<String>,
    rejection_date: Option<DateTime<Utc>>,
    applied_date: Option<DateTime<Utc>>,
    last_contact_date: Option<DateTime<Utc>>,
    excitement_rating: Option<Json<ExcitementRating>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProcessRow> for Process {
    type Error = StoreError;

    fn try_from(row: ProcessRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ProcessStatus>()
            .map_err(|e| StoreError::Corrupt(format!("process {}: {e}", row.id)))?;
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            company_name: row.company_name,
            position: row.position,
            status,
            contact_name: row.contact_name,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            location: row.location,
            job_type: row.job_type,
            source: row.source,
            notes: row.notes,
            rejection_reason: row.rejection_reason,
            rejection_date: row.rejection_date,
            applied_date: row.applied_date,
            last_contact_date: row.last_contact_date,
            excitement_rating: row.excitement_rating.map(|r| r.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ActionItemRow {
    id: Uuid,
    process_id: Uuid,
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ActionItemRow> for ActionItem {
    fn from(row: ActionItemRow) -> Self {
        Self {
            id: row.id,
            process_id: row.process_id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn unique_email_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Database(err)
}

// ────────────────────────────────────────────────────────────────────────────
// TrackerStore
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TrackerStore for PgStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, name, password_hash, excitement_weights)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(&new_user.password_hash)
        .bind(Json(WeightProfile::default()))
        .fetch_one(&self.pool)
        .await
        .map_err(unique_email_violation)?;

        info!("Created user {}", row.id);
        Ok(row.into())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn save_weights(
        &self,
        user_id: Uuid,
        weights: &WeightProfile,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET excitement_weights = $1, weights_customized = TRUE, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(Json(weights))
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_weight_setup_dismissed(
        &self,
        user_id: Uuid,
        dismissed: bool,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET weight_setup_dismissed = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(dismissed)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn list_processes(
        &self,
        user_id: Uuid,
        status: Option<ProcessStatus>,
    ) -> Result<Vec<ProcessDetail>, StoreError> {
        let rows = sqlx::query_as::<_, ProcessRow>(
            r#"
            SELECT * FROM recruitment_processes
            WHERE user_id = $1 AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id)
        .bind(status.map(ProcessStatus::as_str))
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut items = self.action_items_for(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let process = Process::try_from(row)?;
                let process_items = items.remove(&process.id).unwrap_or_default();
                Ok(ProcessDetail::new(process, process_items))
            })
            .collect()
    }

    async fn find_process(
        &self,
        user_id: Uuid,
        process_id: Uuid,
    ) -> Result<Option<ProcessDetail>, StoreError> {
        let row = sqlx::query_as::<_, ProcessRow>(
            "SELECT * FROM recruitment_processes WHERE id = $1 AND user_id = $2",
        )
        .bind(process_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let process = Process::try_from(row)?;
        let items = self
            .action_items_for(&[process.id])
            .await?
            .remove(&process.id)
            .unwrap_or_default();
        Ok(Some(ProcessDetail::new(process, items)))
    }

    async fn insert_process(&self, process: &Process) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO recruitment_processes
                (id, user_id, company_name, position, status, contact_name,
                 contact_email, contact_phone, location, job_type, source, notes,
                 rejection_reason, rejection_date, applied_date, last_contact_date,
                 excitement_rating, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(process.id)
        .bind(process.user_id)
        .bind(&process.company_name)
        .bind(&process.position)
        .bind(process.status.as_str())
        .bind(&process.contact_name)
        .bind(&process.contact_email)
        .bind(&process.contact_phone)
        .bind(&process.location)
        .bind(&process.job_type)
        .bind(&process.source)
        .bind(&process.notes)
        .bind(&process.rejection_reason)
        .bind(process.rejection_date)
        .bind(process.applied_date)
        .bind(process.last_contact_date)
        .bind(process.excitement_rating.as_ref().map(Json))
        .bind(process.created_at)
        .bind(process.updated_at)
        .execute(&self.pool)
        .await?;

        info!("Inserted process {} for user {}", process.id, process.user_id);
        Ok(())
    }

    async fn save_process(&self, process: &Process) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE recruitment_processes
            SET company_name = $1, position = $2, status = $3, contact_name = $4,
                contact_email = $5, contact_phone = $6, location = $7, job_type = $8,
                source = $9, notes = $10, rejection_reason = $11, rejection_date = $12,
                applied_date = $13, last_contact_date = $14, updated_at = $15
            WHERE id = $16 AND user_id = $17
            "#,
        )
        .bind(&process.company_name)
        .bind(&process.position)
        .bind(process.status.as_str())
        .bind(&process.contact_name)
        .bind(&process.contact_email)
        .bind(&process.contact_phone)
        .bind(&process.location)
        .bind(&process.job_type)
        .bind(&process.source)
        .bind(&process.notes)
        .bind(&process.rejection_reason)
        .bind(process.rejection_date)
        .bind(process.applied_date)
        .bind(process.last_contact_date)
        .bind(process.updated_at)
        .bind(process.id)
        .bind(process.user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_process(&self, user_id: Uuid, process_id: Uuid) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM recruitment_processes WHERE id = $1 AND user_id = $2")
                .bind(process_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn save_excitement_rating(
        &self,
        user_id: Uuid,
        process_id: Uuid,
        rating: &ExcitementRating,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE recruitment_processes
            SET excitement_rating = $1, updated_at = NOW()
            WHERE id = $2 AND user_id = $3
            "#,
        )
        .bind(Json(rating))
        .bind(process_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_action_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ActionItem>, StoreError> {
        let row = sqlx::query_as::<_, ActionItemRow>(
            r#"
            SELECT a.* FROM action_items a
            JOIN recruitment_processes p ON p.id = a.process_id
            WHERE a.id = $1 AND p.user_id = $2
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ActionItem::from))
    }

    async fn insert_action_item(
        &self,
        user_id: Uuid,
        item: &ActionItem,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO action_items
                (id, process_id, title, description, due_date, completed, created_at, updated_at)
            SELECT $1, p.id, $3, $4, $5, $6, $7, $8
            FROM recruitment_processes p
            WHERE p.id = $2 AND p.user_id = $9
            "#,
        )
        .bind(item.id)
        .bind(item.process_id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.due_date)
        .bind(item.completed)
        .bind(item.created_at)
        .bind(item.updated_at)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn save_action_item(&self, user_id: Uuid, item: &ActionItem) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE action_items a
            SET title = $1, description = $2, due_date = $3, completed = $4, updated_at = $5
            FROM recruitment_processes p
            WHERE a.id = $6 AND p.id = a.process_id AND p.user_id = $7
            "#,
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.due_date)
        .bind(item.completed)
        .bind(item.updated_at)
        .bind(item.id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_action_item(&self, user_id: Uuid, item_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM action_items a
            USING recruitment_processes p
            WHERE a.id = $1 AND p.id = a.process_id AND p.user_id = $2
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
