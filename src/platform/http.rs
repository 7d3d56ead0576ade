//! HTTP review service implementation

use crate::auth::CredentialProvider;
use crate::error::{Error, Result};
use crate::platform::{CodeReviewDraft, IterationPayload, RemoteService};
use crate::types::{Project, User};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Review service using reqwest
pub struct HttpRemoteService {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

/// Response envelope: `{code, message?, data?}`
#[derive(Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default, alias = "msg")]
    message: Option<String>,
    data: Option<T>,
}

/// Ids may come back as numbers or strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RemoteId {
    Number(i64),
    Text(String),
}

impl RemoteId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Create endpoints return either `{id}` or the bare id
#[derive(Deserialize)]
#[serde(untagged)]
enum Created {
    Object { id: RemoteId },
    Bare(RemoteId),
}

impl Created {
    fn into_id(self) -> String {
        match self {
            Self::Object { id } | Self::Bare(id) => id.into_string(),
        }
    }
}

const SUCCESS_CODES: [i64; 2] = [0, 200];

impl HttpRemoteService {
    /// Create a new service rooted at `base_url`
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send an authenticated request and unwrap the envelope
    ///
    /// `Ok(None)` means a successful envelope without data.
    async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Option<T>> {
        let token = self.credentials.token().await?;
        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("{operation}: HTTP {status}");

        if !status.is_success() {
            return Err(Error::Remote {
                operation,
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
                body: Some(body),
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| Error::Remote {
            operation,
            status: Some(status.as_u16()),
            message: format!("unexpected response: {e}"),
            body: Some(body.clone()),
        })?;

        if !SUCCESS_CODES.contains(&envelope.code) {
            return Err(Error::Remote {
                operation,
                status: Some(status.as_u16()),
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("service returned code {}", envelope.code)),
                body: Some(body),
            });
        }

        Ok(envelope.data)
    }

    async fn create(
        &self,
        operation: &'static str,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<String> {
        let request = self.client.post(self.api_url(path)).json(body);
        self.call::<Created>(operation, request)
            .await?
            .map(Created::into_id)
            .ok_or_else(|| Error::remote(operation, "response carried no id"))
    }
}

#[async_trait]
impl RemoteService for HttpRemoteService {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let request = self.client.get(self.api_url("/projects"));
        Ok(self
            .call::<Vec<Project>>("list projects", request)
            .await?
            .unwrap_or_default())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let request = self.client.get(self.api_url("/users"));
        Ok(self
            .call::<Vec<User>>("list users", request)
            .await?
            .unwrap_or_default())
    }

    async fn create_iteration(&self, payload: &IterationPayload) -> Result<String> {
        let body = serde_json::to_value(payload)?;
        self.create("create iteration", "/iterations", &body).await
    }

    async fn verify_iteration(&self, iteration_id: &str) -> Result<bool> {
        let url = self.api_url(&format!(
            "/iterations/{}",
            urlencoding::encode(iteration_id)
        ));
        match self
            .call::<serde_json::Value>("verify iteration", self.client.get(url))
            .await
        {
            Ok(data) => Ok(data.is_some_and(|d| !d.is_null())),
            Err(Error::Remote {
                status: Some(code), ..
            }) if code == StatusCode::NOT_FOUND.as_u16() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_code_review(
        &self,
        iteration_id: &str,
        review: &CodeReviewDraft,
    ) -> Result<String> {
        let body = serde_json::to_value(review.with_iteration(iteration_id))?;
        self.create("create code review", "/code-reviews", &body)
            .await
    }
}
