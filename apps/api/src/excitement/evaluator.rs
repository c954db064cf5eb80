use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::excitement::categories::{parse_category_values, Category, PerCategory};
use crate::excitement::weights::WeightProfile;
use crate::excitement::ExcitementError;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;

/// Decimal places kept on `overall_score`.
const SCORE_DECIMALS: i32 = 2;

/// Absorbs binary representation error so that decimal ties such as 2.675
/// round the way they read.
const TIE_EPSILON: f64 = 1e-9;

/// Per-category scores in `[MIN_SCORE, MAX_SCORE]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryScores(PerCategory<f64>);

impl CategoryScores {
    /// Validates an untyped `{category: score}` payload: exactly the seven
    /// categories, each a number within the score range.
    pub fn from_candidate(candidate: &BTreeMap<String, Value>) -> Result<Self, ExcitementError> {
        parse_category_values(candidate, "score", MIN_SCORE, MAX_SCORE).map(Self)
    }

    pub fn score(&self, category: Category) -> f64 {
        *self.0.get(category)
    }
}

/// A rating of one recruitment process. Replaced as a whole on every
/// submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcitementRating {
    pub scores: CategoryScores,
    #[serde(default)]
    pub notes: BTreeMap<Category, String>,
    pub overall_score: f64,
    pub rated_at: DateTime<Utc>,
}

/// Keeps notes keyed by a known category, trimming text and dropping blanks.
pub fn parse_notes(
    notes: Option<BTreeMap<String, String>>,
) -> Result<BTreeMap<Category, String>, ExcitementError> {
    let mut parsed = BTreeMap::new();
    for (key, text) in notes.unwrap_or_default() {
        let category: Category = key.parse()?;
        let text = text.trim();
        if !text.is_empty() {
            parsed.insert(category, text.to_string());
        }
    }
    Ok(parsed)
}

/// Σ score × weight over all categories, unrounded.
pub fn weighted_score(scores: &CategoryScores, weights: &WeightProfile) -> f64 {
    Category::ALL
        .into_iter()
        .map(|c| scores.score(c) * weights.weight(c))
        .sum()
}

/// Rounds half away from zero at `decimals` places.
pub fn round_half_away_from_zero(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    let scaled = value * factor;
    (scaled + TIE_EPSILON.copysign(scaled)).round() / factor
}

/// Computes a fresh rating. Nothing from any earlier rating is carried over.
pub fn evaluate(
    scores: CategoryScores,
    notes: BTreeMap<Category, String>,
    weights: &WeightProfile,
    rated_at: DateTime<Utc>,
) -> ExcitementRating {
    let overall_score =
        round_half_away_from_zero(weighted_score(&scores, weights), SCORE_DECIMALS);
    ExcitementRating {
        scores,
        notes,
        overall_score,
        rated_at,
    }
}
