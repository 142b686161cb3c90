use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use surfsup_db::DbError;

/// A request that could not be answered.
///
/// Only the failing request sees the error; the shared state is untouched.
#[derive(Debug)]
pub enum ApiError {
    Db(DbError),
    /// The blocking query task panicked or was cancelled
    Task(tokio::task::JoinError),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::Db(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Task(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Db(DbError::NoData(_)) => StatusCode::NOT_FOUND,
            ApiError::Db(DbError::MalformedInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Db(DbError::DataUnavailable(_) | DbError::Poisoned) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Db(err) => write!(f, "{}", err),
            ApiError::Task(err) => write!(f, "query task failed: {}", err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::error!("request failed with {}: {}", status, self);
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
