use serde::Serialize;

use crate::excitement::categories::{Category, PerCategory};
use crate::excitement::weights::{WeightProfile, RANK_WEIGHTS};
use crate::excitement::ExcitementError;

/// A total ordering of the categories, most important first.
///
/// Weights are always derived from scratch: position `i` gets
/// `RANK_WEIGHTS[i]`, so any reordering yields a profile that sums to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ranking([Category; 7]);

impl Default for Ranking {
    fn default() -> Self {
        Self(Category::ALL)
    }
}

impl Ranking {
    /// Parses a list of category keys. Every category must appear exactly once.
    pub fn parse<S: AsRef<str>>(keys: &[S]) -> Result<Self, ExcitementError> {
        if keys.len() != Category::ALL.len() {
            return Err(ExcitementError::RankingLength(keys.len()));
        }

        let mut order = Category::ALL;
        let mut seen = [false; 7];
        for (slot, key) in order.iter_mut().zip(keys) {
            let category: Category = key.as_ref().parse()?;
            if std::mem::replace(&mut seen[category.index()], true) {
                return Err(ExcitementError::DuplicateInRanking(category));
            }
            *slot = category;
        }
        Ok(Self(order))
    }

    /// Orders categories by descending weight. Ties keep default order.
    pub fn from_weights(weights: &WeightProfile) -> Self {
        let mut order = Category::ALL;
        order.sort_by(|a, b| weights.weight(*b).total_cmp(&weights.weight(*a)));
        Self(order)
    }

    #[cfg(test)]
    pub fn categories(&self) -> &[Category; 7] {
        &self.0
    }

    /// Zero-based rank of `category`.
    pub fn position(&self, category: Category) -> usize {
        self.0
            .iter()
            .position(|c| *c == category)
            .unwrap_or(self.0.len() - 1)
    }

    /// Swaps the item at `index` with the one above it. Returns false when
    /// there is nothing to move.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.0.len() {
            return false;
        }
        self.0.swap(index - 1, index);
        true
    }

    /// Swaps the item at `index` with the one below it. Returns false when
    /// there is nothing to move.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.0.len() {
            return false;
        }
        self.0.swap(index, index + 1);
        true
    }

    pub fn weights(&self) -> WeightProfile {
        WeightProfile::from_values(PerCategory::from_fn(|c| RANK_WEIGHTS[self.position(c)]))
    }
}
