use actix_multipart::MultipartError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::collections::BTreeMap;
use crate::db::StoreError;

pub const EMAIL_TAKEN: &str = "Email already exists";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Field name -> reason, reported inline by the front end.
    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        AppError::Validation(BTreeMap::from([(field.to_string(), reason.into())]))
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a BTreeMap<String, String>>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(fields) => ErrorResponse {
                message: self.to_string(),
                errors: Some(fields),
            },
            AppError::Storage(detail) => {
                log::error!("Storage failure: {}", detail);
                ErrorResponse {
                    message: "Internal server error".to_string(),
                    errors: None,
                }
            }
            _ => ErrorResponse {
                message: self.to_string(),
                errors: None,
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::Conflict(EMAIL_TAKEN.to_string()),
            StoreError::Backend(msg) => AppError::Storage(msg),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(format!("Malformed multipart body: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn validation_error_lists_fields() {
        let (status, json) = body_json(AppError::invalid_field("mobileNo", "Mobile No must be numeric")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Validation failed");
        assert_eq!(json["errors"]["mobileNo"], "Mobile No must be numeric");
    }

    #[actix_web::test]
    async fn storage_error_hides_detail() {
        let (status, json) = body_json(AppError::Storage("disk on fire".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Internal server error");
        assert!(json.get("errors").is_none());
    }

    #[actix_web::test]
    async fn duplicate_email_maps_to_conflict() {
        let (status, json) = body_json(StoreError::DuplicateEmail.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], EMAIL_TAKEN);
    }
}
