use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json`, but rejections answer with the usual `AppError` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
