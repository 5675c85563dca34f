use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Everything the API reports maps onto one of these variants and renders
/// as `{"error": "<message>"}` with the matching status code.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Missing or malformed field, payload, or query string.
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Unknown employee id.
    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// Duplicate employee id or duplicate (employee_id, date) pair.
    #[display(fmt = "{}", _0)]
    Conflict(String),

    /// Driver errors other than constraint violations. The message is kept
    /// generic; the underlying error goes to the log, not the caller.
    #[display(fmt = "Internal Server Error")]
    Database(sqlx::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "database error");
        ApiError::Database(e)
    }
}

/// True when the driver rejected a write on a unique index.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Routes JSON extractor failures through the same `{"error": ...}` shape
/// as every other error response.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(err.to_string()).into()
}
