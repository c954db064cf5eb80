use serde::Serialize;
use uuid::Uuid;

use crate::excitement::WeightProfile;

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub excitement_weights: WeightProfile,
    /// Set on the first explicit weight save; never inferred from values.
    pub weights_customized: bool,
    pub weight_setup_dismissed: bool,
}

/// Fields needed to register an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// The user as returned over the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub weights_customized: bool,
    pub weight_setup_dismissed: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            weights_customized: user.weights_customized,
            weight_setup_dismissed: user.weight_setup_dismissed,
        }
    }
}

/// Emails are unique case-insensitively and stored lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
