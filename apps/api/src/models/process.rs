use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::excitement::{ExcitementRating, ScoreBand};
use crate::models::action_item::ActionItem;
use crate::models::{double_option, require_text, BlankField};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessStatus {
    #[default]
    Applied,
    Screening,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
}

impl ProcessStatus {
    pub const ALL: [ProcessStatus; 6] = [
        ProcessStatus::Applied,
        ProcessStatus::Screening,
        ProcessStatus::Interview,
        ProcessStatus::Offer,
        ProcessStatus::Rejected,
        ProcessStatus::Withdrawn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessStatus::Applied => "APPLIED",
            ProcessStatus::Screening => "SCREENING",
            ProcessStatus::Interview => "INTERVIEW",
            ProcessStatus::Offer => "OFFER",
            ProcessStatus::Rejected => "REJECTED",
            ProcessStatus::Withdrawn => "WITHDRAWN",
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProcessStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown process status '{s}'"))
    }
}

/// One recruitment process (an application at a company).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub position: String,
    pub status: ProcessStatus,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub rejection_date: Option<DateTime<Utc>>,
    pub applied_date: Option<DateTime<Utc>>,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub excitement_rating: Option<ExcitementRating>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Process {
    /// A process entering `REJECTED` without a rejection date is stamped
    /// with `now`.
    fn stamp_rejection(&mut self, now: DateTime<Utc>) {
        if self.status == ProcessStatus::Rejected && self.rejection_date.is_none() {
            self.rejection_date = Some(now);
        }
    }

    pub fn excitement_band(&self) -> Option<ScoreBand> {
        self.excitement_rating
            .as_ref()
            .map(|r| ScoreBand::for_score(r.overall_score))
    }
}

/// Request body for creating a process.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProcess {
    pub company_name: String,
    pub position: String,
    #[serde(default)]
    pub status: ProcessStatus,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub rejection_date: Option<DateTime<Utc>>,
    pub applied_date: Option<DateTime<Utc>>,
    pub last_contact_date: Option<DateTime<Utc>>,
}

impl NewProcess {
    pub fn into_process(self, user_id: Uuid, now: DateTime<Utc>) -> Result<Process, BlankField> {
        let mut process = Process {
            id: Uuid::new_v4(),
            user_id,
            company_name: require_text("companyName", &self.company_name)?,
            position: require_text("position", &self.position)?,
            status: self.status,
            contact_name: self.contact_name,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            location: self.location,
            job_type: self.job_type,
            source: self.source,
            notes: self.notes,
            rejection_reason: self.rejection_reason,
            rejection_date: self.rejection_date,
            applied_date: self.applied_date.or(Some(now)),
            last_contact_date: self.last_contact_date,
            excitement_rating: None,
            created_at: now,
            updated_at: now,
        };
        process.stamp_rejection(now);
        Ok(process)
    }
}

/// Partial update. Absent fields stay as they are; `null` clears an optional
/// field. Ownership, ids and the excitement rating are not reachable here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessUpdate {
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub status: Option<ProcessStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub job_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub source: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rejection_reason: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rejection_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub applied_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub last_contact_date: Option<Option<DateTime<Utc>>>,
}

impl ProcessUpdate {
    pub fn apply(self, process: &mut Process, now: DateTime<Utc>) -> Result<(), BlankField> {
        if let Some(company_name) = self.company_name {
            process.company_name = require_text("companyName", &company_name)?;
        }
        if let Some(position) = self.position {
            process.position = require_text("position", &position)?;
        }
        if let Some(status) = self.status {
            process.status = status;
        }

        let optional_text = [
            (self.contact_name, &mut process.contact_name),
            (self.contact_email, &mut process.contact_email),
            (self.contact_phone, &mut process.contact_phone),
            (self.location, &mut process.location),
            (self.job_type, &mut process.job_type),
            (self.source, &mut process.source),
            (self.notes, &mut process.notes),
            (self.rejection_reason, &mut process.rejection_reason),
        ];
        for (change, field) in optional_text {
            if let Some(value) = change {
                *field = value;
            }
        }

        let optional_dates = [
            (self.rejection_date, &mut process.rejection_date),
            (self.applied_date, &mut process.applied_date),
            (self.last_contact_date, &mut process.last_contact_date),
        ];
        for (change, field) in optional_dates {
            if let Some(value) = change {
                *field = value;
            }
        }

        process.stamp_rejection(now);
        process.updated_at = now;
        Ok(())
    }
}

/// A process as returned over the API: its action items and the display
/// band of its excitement score travel with it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDetail {
    #[serde(flatten)]
    pub process: Process,
    pub action_items: Vec<ActionItem>,
    pub excitement_band: Option<ScoreBand>,
}

impl ProcessDetail {
    pub fn new(process: Process, action_items: Vec<ActionItem>) -> Self {
        Self {
            excitement_band: process.excitement_band(),
            process,
            action_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_process() -> Process {
        let req: NewProcess = serde_json::from_value(json!({
            "companyName": " Acme ",
            "position": "Backend Engineer",
            "contactName": "Dana"
        }))
        .unwrap();
        req.into_process(Uuid::new_v4(), Utc::now()).unwrap()
    }

    #[test]
    fn test_new_process_defaults() {
        let p = new_process();
        assert_eq!(p.company_name, "Acme");
        assert_eq!(p.status, ProcessStatus::Applied);
        assert!(p.applied_date.is_some());
        assert!(p.excitement_rating.is_none());
        assert!(p.rejection_date.is_none());
    }

    #[test]
    fn test_new_process_requires_company() {
        let req: NewProcess = serde_json::from_value(json!({
            "companyName": "  ",
            "position": "Engineer"
        }))
        .unwrap();
        let err = req.into_process(Uuid::new_v4(), Utc::now()).unwrap_err();
        assert_eq!(err.field, "companyName");
    }

    #[test]
    fn test_status_parses_screaming_case() {
        assert_eq!(
            "INTERVIEW".parse::<ProcessStatus>().unwrap(),
            ProcessStatus::Interview
        );
        assert!("interview".parse::<ProcessStatus>().is_err());
        assert_eq!(
            serde_json::to_value(ProcessStatus::Withdrawn).unwrap(),
            json!("WITHDRAWN")
        );
    }

    #[test]
    fn test_update_absent_fields_unchanged_null_clears() {
        let mut p = new_process();
        let update: ProcessUpdate = serde_json::from_value(json!({
            "contactName": null,
            "location": "Berlin"
        }))
        .unwrap();
        update.apply(&mut p, Utc::now()).unwrap();
        assert_eq!(p.contact_name, None);
        assert_eq!(p.location.as_deref(), Some("Berlin"));
        assert_eq!(p.position, "Backend Engineer");
    }

    #[test]
    fn test_update_rejects_blank_position() {
        let mut p = new_process();
        let update: ProcessUpdate = serde_json::from_value(json!({"position": ""})).unwrap();
        assert!(update.apply(&mut p, Utc::now()).is_err());
    }

    #[test]
    fn test_rejection_is_stamped_when_date_missing() {
        let mut p = new_process();
        let now = Utc::now();
        let update: ProcessUpdate = serde_json::from_value(json!({
            "status": "REJECTED",
            "rejectionReason": "Position filled"
        }))
        .unwrap();
        update.apply(&mut p, now).unwrap();
        assert_eq!(p.status, ProcessStatus::Rejected);
        assert_eq!(p.rejection_date, Some(now));
        assert_eq!(p.updated_at, now);
    }

    #[test]
    fn test_explicit_rejection_date_is_kept() {
        let mut p = new_process();
        let update: ProcessUpdate = serde_json::from_value(json!({
            "status": "REJECTED",
            "rejectionDate": "2024-03-01T00:00:00Z"
        }))
        .unwrap();
        update.apply(&mut p, Utc::now()).unwrap();
        assert_eq!(
            p.rejection_date.unwrap().to_rfc3339(),
            "2024-03-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_detail_serializes_flat_with_band() {
        let detail = ProcessDetail::new(new_process(), vec![]);
        let encoded = serde_json::to_value(&detail).unwrap();
        assert_eq!(encoded["companyName"], json!("Acme"));
        assert_eq!(encoded["actionItems"], json!([]));
        assert_eq!(encoded["excitementBand"], json!(null));
        assert_eq!(encoded["excitementRating"], json!(null));
    }
}
