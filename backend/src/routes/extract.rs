//! Request extractors whose rejections use the API error envelope

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body; decode failures become `400 VALIDATION_ERROR`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters; parse failures become `400 VALIDATION_ERROR`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
