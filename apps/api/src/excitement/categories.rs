//! The fixed set of excitement categories and a per-category value container.
//!
//! The category set is closed: exactly seven keys, in default-ranking order.
//! Wire keys are camelCase (`workLife`), matching the JSON stored in the
//! `excitement_weights` and `excitement_rating` columns.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::excitement::ExcitementError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Salary,
    WorkLife,
    Growth,
    Culture,
    Role,
    Location,
    Stability,
}

impl Category {
    /// All categories, most to least important under the default ranking.
    pub const ALL: [Category; 7] = [
        Category::Salary,
        Category::WorkLife,
        Category::Growth,
        Category::Culture,
        Category::Role,
        Category::Location,
        Category::Stability,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::WorkLife => "workLife",
            Category::Growth => "growth",
            Category::Culture => "culture",
            Category::Role => "role",
            Category::Location => "location",
            Category::Stability => "stability",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Salary => "Salary & Compensation",
            Category::WorkLife => "Work-Life Balance",
            Category::Growth => "Career Growth",
            Category::Culture => "Company Culture",
            Category::Role => "Role Interest",
            Category::Location => "Location & Commute",
            Category::Stability => "Company Stability",
        }
    }

    /// Position in `Category::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = ExcitementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| ExcitementError::UnknownCategory(s.to_string()))
    }
}

/// One value per category. Serialized as an object with exactly the seven
/// category keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerCategory<T> {
    pub salary: T,
    pub work_life: T,
    pub growth: T,
    pub culture: T,
    pub role: T,
    pub location: T,
    pub stability: T,
}

impl<T> PerCategory<T> {
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            salary: f(Category::Salary),
            work_life: f(Category::WorkLife),
            growth: f(Category::Growth),
            culture: f(Category::Culture),
            role: f(Category::Role),
            location: f(Category::Location),
            stability: f(Category::Stability),
        }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Salary => &self.salary,
            Category::WorkLife => &self.work_life,
            Category::Growth => &self.growth,
            Category::Culture => &self.culture,
            Category::Role => &self.role,
            Category::Location => &self.location,
            Category::Stability => &self.stability,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Decodes an untyped `{key: number}` payload into one value per category.
///
/// Fails on the first unknown key (in key order), then on the first missing
/// category, then on the first value that is not a finite number inside
/// `[min, max]`. `field` names the quantity in error messages.
pub fn parse_category_values(
    candidate: &BTreeMap<String, Value>,
    field: &'static str,
    min: f64,
    max: f64,
) -> Result<PerCategory<f64>, ExcitementError> {
    for key in candidate.keys() {
        key.parse::<Category>()?;
    }

    let mut values = [0.0_f64; 7];
    for category in Category::ALL {
        let raw = candidate
            .get(category.key())
            .ok_or(ExcitementError::MissingCategory(category))?;
        let value = raw
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or(ExcitementError::NotANumber { field, category })?;
        if !(min..=max).contains(&value) {
            return Err(ExcitementError::OutOfRange {
                field,
                category,
                value,
                min,
                max,
            });
        }
        values[category.index()] = value;
    }

    Ok(PerCategory::from_fn(|c| values[c.index()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        assert_eq!(
            serde_json::to_value(Category::WorkLife).unwrap(),
            json!("workLife")
        );
        let values = PerCategory::from_fn(|c| c.index());
        let encoded = serde_json::to_value(values).unwrap();
        assert_eq!(encoded["workLife"], json!(1));
        assert_eq!(encoded["stability"], json!(6));
    }

    #[test]
    fn test_index_matches_default_order() {
        for (i, category) in Category::ALL.into_iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_parse_accepts_integers_and_reals() {
        let values = parse_category_values(
            &payload(json!({
                "salary": 5, "workLife": 4.5, "growth": 1, "culture": 3,
                "role": 2, "location": 3.25, "stability": 4
            })),
            "score",
            1.0,
            5.0,
        )
        .unwrap();
        assert_eq!(values.salary, 5.0);
        assert_eq!(values.work_life, 4.5);
        assert_eq!(values.location, 3.25);
    }

    #[test]
    fn test_parse_rejects_unknown_key_before_missing() {
        let err = parse_category_values(
            &payload(json!({"salary": 1, "bonus": 1})),
            "score",
            1.0,
            5.0,
        )
        .unwrap_err();
        assert_eq!(err, ExcitementError::UnknownCategory("bonus".into()));
    }

    #[test]
    fn test_parse_reports_missing_category() {
        let err = parse_category_values(
            &payload(json!({
                "salary": 1, "workLife": 1, "growth": 1, "culture": 1,
                "role": 1, "location": 1
            })),
            "score",
            1.0,
            5.0,
        )
        .unwrap_err();
        assert_eq!(err, ExcitementError::MissingCategory(Category::Stability));
    }

    #[test]
    fn test_parse_rejects_non_numeric_value() {
        let err = parse_category_values(
            &payload(json!({
                "salary": "high", "workLife": 1, "growth": 1, "culture": 1,
                "role": 1, "location": 1, "stability": 1
            })),
            "score",
            1.0,
            5.0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ExcitementError::NotANumber {
                field: "score",
                category: Category::Salary
            }
        );
    }
}
