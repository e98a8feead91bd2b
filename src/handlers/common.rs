use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::RequestMethod;

/// Unwrap a JSON body, turning extractor rejections into 400s
pub fn read_envelope<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::Validation(e.body_text()))
}

/// Require the id field of an envelope
pub fn require_id(id: Option<Uuid>, field: &'static str) -> AppResult<Uuid> {
    id.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

/// Decode the data field of an envelope into the payload the method expects
pub fn parse_data<T: DeserializeOwned>(
    data: Option<serde_json::Value>,
    field: &'static str,
) -> AppResult<T> {
    let value = data.ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;

    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(format!("Invalid {}: {}", field, e)))
}

/// Error for a method the collection does not support
pub fn unsupported(method: RequestMethod, collection: &str) -> AppError {
    AppError::Validation(format!(
        "{} is not supported for {}",
        method.as_str(),
        collection
    ))
}
