//! Accounts and bearer-token authentication.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod token;

use thiserror::Error;

use crate::errors::AppError;

pub use extractor::AuthUser;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::InvalidCredentials => {
                AppError::Unauthorized(err.to_string())
            }
            AuthError::Signing(_) | AuthError::Hashing(_) => {
                AppError::Internal(anyhow::Error::new(err))
            }
        }
    }
}
