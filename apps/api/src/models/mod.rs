pub mod action_item;
pub mod process;
pub mod user;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::errors::AppError;

/// A required text field was empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} cannot be empty")]
pub struct BlankField {
    pub field: &'static str,
}

impl From<BlankField> for AppError {
    fn from(err: BlankField) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Trims `value`, rejecting it when nothing is left.
pub fn require_text(field: &'static str, value: &str) -> Result<String, BlankField> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BlankField { field });
    }
    Ok(trimmed.to_string())
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates. Use with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
