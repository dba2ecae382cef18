use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taskboard_app::TaskServiceError;
use tracing::error;

/// Operation that produced an error; selects the fixed failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /tasks`
    List,
    /// `POST /tasks`
    Create,
    /// `PUT /tasks/:id`
    Update,
    /// `DELETE /tasks/:id`
    Delete,
}

impl Operation {
    const fn storage_failure(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch tasks",
            Self::Create => "Failed to add task",
            Self::Update => "Failed to update task",
            Self::Delete => "Failed to delete task",
        }
    }

    /// Message for a request that matched no active record.
    #[must_use]
    pub const fn not_found(self) -> &'static str {
        match self {
            Self::Update => "Task not found or no changes made",
            Self::List | Self::Create | Self::Delete => "Task not found",
        }
    }
}

/// `{"error": ...}` response with a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 400 with the given reason.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// 404 with the operation's fixed message.
    #[must_use]
    pub fn not_found(operation: Operation) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: operation.not_found().to_owned(),
        }
    }

    /// Map a service failure to the fixed shape. Storage detail is logged,
    /// never returned.
    #[must_use]
    pub fn from_service(operation: Operation, err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Validation(err) => Self::bad_request(err.to_string()),
            TaskServiceError::NotFound(_) | TaskServiceError::NotFoundOrNoChange(_) => {
                Self::not_found(operation)
            }
            TaskServiceError::Store(err) => {
                error!(?operation, error = %err, "storage failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: operation.storage_failure().to_owned(),
                }
            }
        }
    }

    /// Malformed or unexpected JSON body.
    #[must_use]
    pub fn from_rejection(rejection: &JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }

    /// Query string that does not decode into a filter.
    #[must_use]
    pub fn from_query_rejection(rejection: &QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }

    /// Status code of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Error message of the response.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
