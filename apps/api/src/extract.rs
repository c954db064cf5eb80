use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejections are reported as validation errors in the
/// usual error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
