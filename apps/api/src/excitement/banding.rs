use serde::{Deserialize, Serialize};

/// Display band for an overall score. Boundaries are half-open from below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    #[serde(rename = "excellent")]
    Excellent,
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "fair")]
    Fair,
    #[serde(rename = "poor")]
    Poor,
    #[serde(rename = "very poor")]
    VeryPoor,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 4.5 {
            ScoreBand::Excellent
        } else if score >= 3.5 {
            ScoreBand::Good
        } else if score >= 2.5 {
            ScoreBand::Fair
        } else if score >= 1.5 {
            ScoreBand::Poor
        } else {
            ScoreBand::VeryPoor
        }
    }
}
