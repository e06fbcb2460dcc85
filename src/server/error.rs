use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conversation::ServiceError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Translation failed. Please try again.")]
    Translation { fallback: bool },
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(message) => ApiError::BadRequest(message),
            ServiceError::Translation { fallback, .. } => ApiError::Translation { fallback },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        log::debug!("rejected request body: {rejection}");
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, fallback) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, false),
            ApiError::Translation { fallback } => (StatusCode::INTERNAL_SERVER_ERROR, *fallback),
        };

        let body = ErrorBody {
            message: self.to_string(),
            fallback,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::TranslateError;

    #[test]
    fn validation_maps_to_bad_request() {
        let err: ApiError = ServiceError::Validation("userMessage is required".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_details_are_not_exposed() {
        let err: ApiError = ServiceError::fallback_translation(TranslateError::Api {
            status: 403,
            body: "Wrong key".into(),
        })
        .into();
        assert_eq!(err.to_string(), "Translation failed. Please try again.");
        assert!(matches!(err, ApiError::Translation { fallback: true }));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn fallback_flag_only_serialised_when_set() {
        let body = ErrorBody {
            message: "x".into(),
            fallback: false,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"message":"x"}"#);
    }
}
