use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use paradero_core::error::ParaderoError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ParaderoError> for ApiError {
    fn from(err: ParaderoError) -> Self {
        match err {
            ParaderoError::Precondition(message) => Self::bad_request(message),
            ParaderoError::NotFound { .. } => Self::not_found(err.to_string()),
            ParaderoError::ExtractionParse(reason) => {
                Self::internal(format!("Error al procesar la respuesta de la IA: {}", reason))
            }
            ParaderoError::Authentication { .. } | ParaderoError::Upstream { .. } => {
                Self::internal(err.to_string())
            }
            _ => Self::internal("Internal error").with_details(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ParaderoError::Precondition("x".into()), StatusCode::BAD_REQUEST),
            (ParaderoError::not_found("Draft 1"), StatusCode::NOT_FOUND),
            (ParaderoError::upstream("Gemini", "HTTP 503"), StatusCode::INTERNAL_SERVER_ERROR),
            (ParaderoError::ExtractionParse("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ParaderoError::Document("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                ParaderoError::Authentication {
                    service: "Drive".into(),
                    reason: "no key".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_request_errors_keep_message() {
        let err = ApiError::from(ParaderoError::Precondition("Faltan descripciones".into()));
        assert_eq!(err.message, "Faltan descripciones");
        assert!(err.details.is_none());

        let err = ApiError::from(ParaderoError::ExtractionParse("expected value".into()));
        assert_eq!(err.message, "Error al procesar la respuesta de la IA: expected value");
    }
}
