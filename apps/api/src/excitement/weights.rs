use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::excitement::categories::{parse_category_values, Category, PerCategory};
use crate::excitement::ranking::Ranking;
use crate::excitement::ExcitementError;

/// Allowed distance between the weight total and 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Weights handed out by rank position, most important first.
/// Also the default profile under the default ranking.
pub const RANK_WEIGHTS: [f64; 7] = [0.35, 0.25, 0.15, 0.10, 0.08, 0.05, 0.02];

/// A user's per-category importance weights. Always holds all seven
/// categories; a validated profile sums to 1 within `WEIGHT_SUM_TOLERANCE`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightProfile(PerCategory<f64>);

impl Default for WeightProfile {
    fn default() -> Self {
        Self(PerCategory::from_fn(|c| RANK_WEIGHTS[c.index()]))
    }
}

impl WeightProfile {
    pub fn weight(&self, category: Category) -> f64 {
        *self.0.get(category)
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, w)| *w).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(c, w)| (c, *w))
    }

    /// Builds a profile from an untyped `{category: weight}` payload.
    ///
    /// Requires exactly the seven category keys, every value a number in
    /// `[0, 1]`, and a total within `WEIGHT_SUM_TOLERANCE` of 1.
    pub fn from_candidate(candidate: &BTreeMap<String, Value>) -> Result<Self, ExcitementError> {
        let values = parse_category_values(candidate, "weight", 0.0, 1.0)?;
        Self(values).validated()
    }

    /// Re-checks range and total on an already typed profile.
    pub fn validated(self) -> Result<Self, ExcitementError> {
        for (category, weight) in self.iter() {
            if !weight.is_finite() {
                return Err(ExcitementError::NotANumber {
                    field: "weight",
                    category,
                });
            }
            if !(0.0..=1.0).contains(&weight) {
                return Err(ExcitementError::OutOfRange {
                    field: "weight",
                    category,
                    value: weight,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        let sum = self.total();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ExcitementError::SumMismatch { sum });
        }
        Ok(self)
    }

    pub(crate) fn from_values(values: PerCategory<f64>) -> Self {
        Self(values)
    }
}

/// What the weights endpoints return.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightSettings {
    pub weights: WeightProfile,
    /// Whether the user has ever saved weights explicitly.
    pub customized: bool,
    /// Categories ordered by weight, for the ranking editor.
    pub ranking: Ranking,
}

impl WeightSettings {
    pub fn new(weights: WeightProfile, customized: bool) -> Self {
        Self {
            ranking: Ranking::from_weights(&weights),
            weights,
            customized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(value: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_default_profile_matches_fixed_sequence() {
        let profile = WeightProfile::default();
        assert_eq!(profile.weight(Category::Salary), 0.35);
        assert_eq!(profile.weight(Category::WorkLife), 0.25);
        assert_eq!(profile.weight(Category::Growth), 0.15);
        assert_eq!(profile.weight(Category::Culture), 0.10);
        assert_eq!(profile.weight(Category::Role), 0.08);
        assert_eq!(profile.weight(Category::Location), 0.05);
        assert_eq!(profile.weight(Category::Stability), 0.02);
        assert!((profile.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_profile_serializes_with_category_keys() {
        let encoded = serde_json::to_value(WeightProfile::default()).unwrap();
        assert_eq!(
            encoded,
            json!({
                "salary": 0.35, "workLife": 0.25, "growth": 0.15, "culture": 0.10,
                "role": 0.08, "location": 0.05, "stability": 0.02
            })
        );
    }

    #[test]
    fn test_accepts_valid_candidate() {
        let profile = WeightProfile::from_candidate(&candidate(json!({
            "salary": 0.1, "workLife": 0.2, "growth": 0.3, "culture": 0.1,
            "role": 0.1, "location": 0.1, "stability": 0.1
        })))
        .unwrap();
        assert_eq!(profile.weight(Category::Growth), 0.3);
    }

    #[test]
    fn test_accepts_sum_within_tolerance() {
        let profile = WeightProfile::from_candidate(&candidate(json!({
            "salary": 0.355, "workLife": 0.25, "growth": 0.15, "culture": 0.10,
            "role": 0.08, "location": 0.05, "stability": 0.02
        })));
        assert!(profile.is_ok());
    }

    #[test]
    fn test_rejects_sum_of_one_half() {
        let err = WeightProfile::from_candidate(&candidate(json!({
            "salary": 0.2, "workLife": 0.1, "growth": 0.05, "culture": 0.05,
            "role": 0.05, "location": 0.03, "stability": 0.02
        })))
        .unwrap_err();
        match err {
            ExcitementError::SumMismatch { sum } => assert!((sum - 0.5).abs() < 1e-9),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_rejects_missing_stability() {
        let err = WeightProfile::from_candidate(&candidate(json!({
            "salary": 0.35, "workLife": 0.25, "growth": 0.15, "culture": 0.10,
            "role": 0.10, "location": 0.05
        })))
        .unwrap_err();
        assert_eq!(err, ExcitementError::MissingCategory(Category::Stability));
    }

    #[test]
    fn test_rejects_extra_key() {
        let err = WeightProfile::from_candidate(&candidate(json!({
            "salary": 0.35, "workLife": 0.25, "growth": 0.15, "culture": 0.10,
            "role": 0.08, "location": 0.05, "stability": 0.02, "perks": 0.0
        })))
        .unwrap_err();
        assert_eq!(err, ExcitementError::UnknownCategory("perks".into()));
    }

    #[test]
    fn test_rejects_out_of_range_weight() {
        let err = WeightProfile::from_candidate(&candidate(json!({
            "salary": 1.2, "workLife": -0.2, "growth": 0.0, "culture": 0.0,
            "role": 0.0, "location": 0.0, "stability": 0.0
        })))
        .unwrap_err();
        assert!(matches!(
            err,
            ExcitementError::OutOfRange {
                category: Category::Salary,
                ..
            }
        ));
    }

    #[test]
    fn test_error_message_names_the_field() {
        let err = WeightProfile::from_candidate(&candidate(json!({
            "salary": 0.35, "workLife": 0.25, "growth": 0.15, "culture": 0.10,
            "role": 0.08, "location": 0.05
        })))
        .unwrap_err();
        assert!(err.to_string().contains("stability"), "{err}");
    }
}
