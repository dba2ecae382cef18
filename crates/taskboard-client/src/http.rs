//! REST backend for [`TaskApi`].

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use taskboard_app::{DeleteOutcome, InsertOutcome};
use taskboard_core::{
    CreateTaskRequest, NewTask, Task, TaskFilter, TaskId, TaskPatch, UpdateTaskRequest,
};
use tracing::debug;

use crate::api::TaskApi;
use crate::error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to a running `taskboard serve` instance.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    base_url: Url,
    client: Client,
}

impl HttpTaskApi {
    /// Build a client for the server at `base_url` (e.g. `http://127.0.0.1:3000`).
    ///
    /// # Errors
    /// Returns [`ClientError::Decode`] when the URL cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Decode(format!("invalid base url '{base_url}': {e}")))?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Ok(Self { base_url, client })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Decode(format!("invalid request path '{path}': {e}")))
    }

    fn task_url(&self, id: TaskId) -> Result<Url, ClientError> {
        self.url(&format!("/tasks/{id}"))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(format!("read body failed: {e}")));
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
    };
    debug!(status = status.as_u16(), %message, "request failed");
    Err(match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

impl TaskApi for HttpTaskApi {
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, ClientError> {
        let response = self
            .client
            .get(self.url("/tasks")?)
            .query(filter)
            .send()
            .await?;
        decode(response).await
    }

    async fn create(&self, new: &NewTask) -> Result<InsertOutcome, ClientError> {
        let body = CreateTaskRequest::from(new.clone());
        let response = self
            .client
            .post(self.url("/tasks")?)
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ClientError> {
        let body = UpdateTaskRequest::from(patch.clone());
        let response = self
            .client
            .put(self.task_url(id)?)
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete(&self, id: TaskId) -> Result<DeleteOutcome, ClientError> {
        let response = self.client.delete(self.task_url(id)?).send().await?;
        decode(response).await
    }
}
