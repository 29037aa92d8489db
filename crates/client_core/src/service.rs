//! The addition service seam and its HTTP implementation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::RequestFailed,
    protocol::{AdditionReply, AdditionRequest, PERFORM_ADDITION_PATH},
};
use tracing::debug;
use url::Url;

#[async_trait]
pub trait AdditionService: Send + Sync {
    async fn perform_addition(
        &self,
        request: &AdditionRequest,
    ) -> std::result::Result<AdditionReply, RequestFailed>;
}

/// Posts addition requests to `<server_url>/performaddition`.
///
/// One request per call. No retries and no client-side timeout.
pub struct HttpAdditionService {
    http: Client,
    endpoint: Url,
}

impl HttpAdditionService {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self> {
        let base = Url::parse(server_url.trim())
            .with_context(|| format!("invalid addition server url '{server_url}'"))?;
        let endpoint = base
            .join(PERFORM_ADDITION_PATH)
            .with_context(|| format!("cannot build addition endpoint from '{base}'"))?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AdditionService for HttpAdditionService {
    async fn perform_addition(
        &self,
        request: &AdditionRequest,
    ) -> std::result::Result<AdditionReply, RequestFailed> {
        debug!(endpoint = %self.endpoint, "posting addition request");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(request_failed)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RequestFailed::status(status.as_u16()));
        }
        let body = response.bytes().await.map_err(request_failed)?;
        Ok(AdditionReply::from_body(&body))
    }
}

fn request_failed(err: reqwest::Error) -> RequestFailed {
    match err.status() {
        Some(status) => RequestFailed::status(status.as_u16()),
        None => RequestFailed::transport(err.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
