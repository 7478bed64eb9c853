use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

/// Caller-facing error taxonomy for the callable operations.
///
/// Callable handlers surface these directly with no retry; the caller
/// decides whether to retry. Trigger-style hooks log and drop anything
/// the platform cannot remediate instead of returning these.
#[derive(Debug)]
pub enum AppError {
    Unauthenticated(String),
    InvalidArgument(String),
    FailedPrecondition(String),
    NotFound(String),
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            AppError::FailedPrecondition(msg) => write!(f, "Failed precondition: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::FailedPrecondition(_) => StatusCode::PRECONDITION_FAILED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            AppError::Unauthenticated("no token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidArgument("too long".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FailedPrecondition("already voted".into()).status_code(),
            StatusCode::PRECONDITION_FAILED
        );
        assert_eq!(
            AppError::NotFound("user".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn unauthenticated_response_uses_the_json_envelope() {
        // Middleware rejections go through this impl, so the 401 body
        // has the same shape as every other error response.
        let res = AppError::Unauthenticated("Missing authorization token".into()).error_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(
            value["error"],
            "Unauthenticated: Missing authorization token"
        );
    }

    #[test]
    fn display_includes_detail() {
        let e = AppError::FailedPrecondition("You can only vote something up once".into());
        assert_eq!(
            e.to_string(),
            "Failed precondition: You can only vote something up once"
        );
    }
}
