//! Task API access.
//!
//! [`TaskApi`] is the seam the board talks through; [`HttpTaskClient`] is the
//! REST implementation against a taskdeck server.

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use taskdeck_core::{Task, TaskCreateParams, TaskUpdateParams};

use crate::errors::ClientError;

/// Default collection URL of a local server.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/tasks";

/// Remote task collection.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// All tasks, newest first.
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;

    /// Create a task and return the stored copy.
    async fn create_task(&self, params: &TaskCreateParams) -> Result<Task, ClientError>;

    /// Apply a partial update. `Ok(None)` means the server had no such task.
    async fn update_task(
        &self,
        id: &str,
        updates: &TaskUpdateParams,
    ) -> Result<Option<Task>, ClientError>;

    /// Delete a task.
    async fn delete_task(&self, id: &str) -> Result<(), ClientError>;

    /// `host:port` of the backend, for user-facing messages.
    fn address(&self) -> String;
}

/// Why a request failed. Never leaves this module.
#[derive(Debug, thiserror::Error)]
enum RequestError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Log the cause at debug and collapse it into the operation's error.
fn discard(op: ClientError) -> impl FnOnce(RequestError) -> ClientError {
    move |cause| {
        debug!(error = %cause, "{op}");
        op
    }
}

/// REST client for `/api/tasks`.
#[derive(Clone, Debug)]
pub struct HttpTaskClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTaskClient {
    /// Client for the collection at `base_url` (e.g. `http://host:5000/api/tasks`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Client sharing an existing `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn collection_url(&self) -> Result<Url, RequestError> {
        Url::parse(&self.base_url).map_err(|e| RequestError::Url(e.to_string()))
    }

    fn task_url(&self, id: &str) -> Result<Url, RequestError> {
        let mut url = self.collection_url()?;
        let _ = url
            .path_segments_mut()
            .map_err(|()| RequestError::Url(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, RequestError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RequestError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, RequestError> {
        Ok(Self::send(request).await?.json::<T>().await?)
    }
}

#[async_trait]
impl TaskApi for HttpTaskClient {
    #[instrument(skip(self))]
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let result: Result<Vec<Task>, RequestError> = async {
            let url = self.collection_url()?;
            Self::send_json(self.client.get(url)).await
        }
        .await;
        result.map_err(discard(ClientError::Fetch))
    }

    #[instrument(skip_all)]
    async fn create_task(&self, params: &TaskCreateParams) -> Result<Task, ClientError> {
        let result: Result<Task, RequestError> = async {
            let url = self.collection_url()?;
            Self::send_json(self.client.post(url).json(params)).await
        }
        .await;
        result.map_err(discard(ClientError::Create))
    }

    #[instrument(skip(self, updates))]
    async fn update_task(
        &self,
        id: &str,
        updates: &TaskUpdateParams,
    ) -> Result<Option<Task>, ClientError> {
        let result: Result<Option<Task>, RequestError> = async {
            let url = self.task_url(id)?;
            Self::send_json(self.client.patch(url).json(updates)).await
        }
        .await;
        result.map_err(discard(ClientError::Update))
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        let result: Result<(), RequestError> = async {
            let url = self.task_url(id)?;
            let _ = Self::send(self.client.delete(url)).await?;
            Ok(())
        }
        .await;
        result.map_err(discard(ClientError::Delete))
    }

    fn address(&self) -> String {
        match Url::parse(&self.base_url) {
            Ok(url) => match (url.host_str(), url.port_or_known_default()) {
                (Some(host), Some(port)) => format!("{host}:{port}"),
                (Some(host), None) => host.to_string(),
                _ => self.base_url.clone(),
            },
            Err(_) => self.base_url.clone(),
        }
    }
}
