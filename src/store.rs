use crate::{
    errors::{ContextStoreError, ContextStoreResult},
    types::{AddContextRequest, ContextEntry},
};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// The remote store that persists context entries.
///
/// The panel only ever reads the full collection and appends single
/// entries; there is no update or delete surface.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Fetch the full context collection.
    async fn fetch_all(&self) -> ContextStoreResult<Vec<ContextEntry>>;

    /// Persist a new entry and return the stored object, which may echo or
    /// augment the submission.
    async fn add(&self, request: &AddContextRequest) -> ContextStoreResult<ContextEntry>;
}

/// `ContextStore` implementation over the store's HTTP interface.
pub struct HttpContextStore {
    base_url: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct HttpContextStoreOptions {
    /// Overrides the default remote store location.
    pub base_url: Option<String>,
    pub client: Option<Client>,
}

impl HttpContextStore {
    #[must_use]
    pub fn new(options: HttpContextStoreOptions) -> Self {
        let HttpContextStoreOptions { base_url, client } = options;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);

        Self { base_url, client }
    }
}

#[async_trait]
impl ContextStore for HttpContextStore {
    async fn fetch_all(&self) -> ContextStoreResult<Vec<ContextEntry>> {
        let url = format!("{}/get_context", self.base_url);
        tracing::debug!(%url, "fetching context collection");
        let response = self
            .client
            .get(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let body = read_json(response).await?;
        // A missing or non-array `contexts` field is an empty collection,
        // not an error.
        match body.get("contexts") {
            Some(contexts @ Value::Array(_)) => Ok(serde_json::from_value(contexts.clone())?),
            _ => Ok(Vec::new()),
        }
    }

    async fn add(&self, request: &AddContextRequest) -> ContextStoreResult<ContextEntry> {
        let url = format!("{}/add_context", self.base_url);
        tracing::debug!(%url, category = %request.category, "adding context entry");
        let response = self.client.post(&url).json(request).send().await?;
        let body = read_json(response).await?;
        if body.get("status").and_then(Value::as_str) == Some("error") {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("the store rejected the entry")
                .to_string();
            return Err(ContextStoreError::Rejected(message));
        }
        Ok(serde_json::from_value(body)?)
    }
}

/// Parse the response body as JSON.
/// Throws error on non-success status code.
async fn read_json(response: reqwest::Response) -> ContextStoreResult<Value> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(ContextStoreError::StatusCode(
            response.status(),
            response.text().await.unwrap_or_default(),
        ))
    }
}
