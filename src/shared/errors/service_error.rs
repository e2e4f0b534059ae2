use axum::{Json, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Service-level errors.
///
/// Every failure a caller can see maps to one of these variants; the
/// `#[error]` strings are the only messages ever surfaced. Store errors and
/// query text stay inside the `Internal` source and go to the logs only.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Requested blog does not exist
    #[error("blog is not exist")]
    BlogNotFound,

    /// Requested comment does not exist
    #[error("comment is not exist")]
    CommentNotFound,

    /// Requested user does not exist
    #[error("user is not exist")]
    UserNotFound,

    /// No grant for (user, resource, action)
    #[error("user does not have permission")]
    NoPermission,

    /// Validation failure, malformed foreign key, or a replayed/expired/
    /// malformed token
    #[error("invalid parameter")]
    InvalidParameter,

    /// Store or transport fault not attributable to caller input
    #[error("something went wrong in server, you can try again")]
    Internal(#[source] anyhow::Error),
}

impl ServiceError {
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        ServiceError::Internal(err.into())
    }
}

/// Convert a ServiceError into an HTTP response pair.
impl From<ServiceError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::BlogNotFound
            | ServiceError::CommentNotFound
            | ServiceError::UserNotFound => StatusCode::NOT_FOUND,
            ServiceError::NoPermission => StatusCode::UNAUTHORIZED,
            ServiceError::InvalidParameter => StatusCode::BAD_REQUEST,
            ServiceError::Internal(source) => {
                tracing::error!(error = ?source, "internal service error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_hides_detail() {
        let err = ServiceError::internal(anyhow::anyhow!("SELECT * FROM blogs exploded"));
        let (status, body) = <(StatusCode, Json<serde_json::Value>)>::from(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body.0["error"].as_str().unwrap();
        assert!(!message.contains("SELECT"));
        assert_eq!(message, "something went wrong in server, you can try again");
    }

    #[test]
    fn no_permission_is_distinct_from_not_found() {
        let (denied, _) = <(StatusCode, Json<serde_json::Value>)>::from(ServiceError::NoPermission);
        let (missing, _) =
            <(StatusCode, Json<serde_json::Value>)>::from(ServiceError::BlogNotFound);
        assert_eq!(denied, StatusCode::UNAUTHORIZED);
        assert_eq!(missing, StatusCode::NOT_FOUND);
    }
}
