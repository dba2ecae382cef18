use taskboard_app::TaskServiceError;
use thiserror::Error;

/// Failures observed by the client state layer.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Target task is missing, deleted, or the update changed nothing.
    #[error("{0}")]
    NotFound(String),

    /// Payload rejected by the server.
    #[error("{0}")]
    Validation(String),

    /// Server-side failure reported with a fixed message.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code (500 for in-process storage failures).
        status: u16,
        /// Message from the error body.
        message: String,
    },

    /// Request could not be delivered.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<TaskServiceError> for ClientError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Validation(err) => Self::Validation(err.to_string()),
            err @ (TaskServiceError::NotFound(_) | TaskServiceError::NotFoundOrNoChange(_)) => {
                Self::NotFound(err.to_string())
            }
            err @ TaskServiceError::Store(_) => Self::Server {
                status: 500,
                message: err.to_string(),
            },
        }
    }
}
