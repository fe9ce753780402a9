use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejections (missing content type, unparsable or
/// oversized body) are reported through `AppError`, so every failure uses
/// the same error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
