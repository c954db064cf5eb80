// Excitement scoring: per-user weight profiles, the rank-to-weight transform,
// the weighted evaluator and the display bands shown next to every score.
// Everything except `service` and `handlers` is pure and storage-agnostic.

pub mod banding;
pub mod categories;
pub mod evaluator;
pub mod handlers;
pub mod ranking;
pub mod service;
pub mod weights;

use thiserror::Error;

use crate::errors::AppError;

pub use banding::ScoreBand;
pub use categories::Category;
pub use evaluator::{CategoryScores, ExcitementRating};
pub use ranking::Ranking;
pub use weights::WeightProfile;

/// Input that violates the scoring model's contracts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExcitementError {
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("missing category '{0}'")]
    MissingCategory(Category),

    #[error("{field} for '{category}' must be a number")]
    NotANumber {
        field: &'static str,
        category: Category,
    },

    #[error("{field} for '{category}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        category: Category,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("weights must sum to 1, got {sum:.3}")]
    SumMismatch { sum: f64 },

    #[error("ranking must list all 7 categories, got {0}")]
    RankingLength(usize),

    #[error("category '{0}' appears more than once in ranking")]
    DuplicateInRanking(Category),
}

impl From<ExcitementError> for AppError {
    fn from(err: ExcitementError) -> Self {
        AppError::Validation(err.to_string())
    }
}
