//! HTTP implementation of the content gateway.
//!
//! Talks to the backing content service over REST. Every response body is
//! content-type-checked before it is parsed as JSON: a non-JSON body is a
//! gateway failure, never a parse crash. Structurally invalid JSON bodies
//! on the fetch paths are handed to the lenient core parsers, which treat
//! them as absent data with a diagnostic warning.

use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use vitrine_core::content::gateway::ContentGateway;
use vitrine_core::content::{parse_profile_patch, parse_stored_sections};
use vitrine_core::error::{Result, VitrineError};
use vitrine_core::profile::ProfilePatch;
use vitrine_core::section::{SectionDraft, SectionOrder, SectionPatch, StoredSection};

use crate::config::GatewayConfig;

/// Gateway implementation over the content service's REST API.
#[derive(Clone)]
pub struct HttpContentGateway {
    client: Client,
    base_url: String,
}

impl HttpContentGateway {
    /// Creates a gateway from the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| VitrineError::gateway(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a gateway from `VITRINE_GATEWAY_URL` and friends.
    pub fn try_from_env() -> Result<Self> {
        Self::new(GatewayConfig::try_from_env()?)
    }

    fn url(&self, owner_id: &str, path: &str) -> String {
        format!("{}/owners/{}/{}", self.base_url, owner_id, path)
    }

    /// GET returning the parsed JSON body, or `None` on 404.
    async fn get_json(&self, url: String) -> Result<Option<Value>> {
        debug!(%url, "gateway GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        read_json_body(response).await.map(Some)
    }

    /// Sends a mutation and checks the `{success, error?}` acknowledgement.
    async fn send_ack(&self, request: RequestBuilder) -> Result<AckBody> {
        let response = request.send().await.map_err(map_transport_error)?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let value = read_json_body(response).await?;
        let ack: AckBody = serde_json::from_value(value).map_err(|err| {
            VitrineError::gateway(format!("malformed gateway acknowledgement: {err}"))
        })?;
        if !ack.success {
            return Err(VitrineError::gateway(
                ack.error
                    .unwrap_or_else(|| "gateway rejected the request".to_string()),
            ));
        }
        Ok(ack)
    }
}

#[async_trait::async_trait]
impl ContentGateway for HttpContentGateway {
    async fn fetch_profile(&self, owner_id: &str) -> Result<Option<ProfilePatch>> {
        match self.get_json(self.url(owner_id, "profile")).await? {
            Some(value) => Ok(parse_profile_patch(&value)),
            None => Ok(None),
        }
    }

    async fn save_profile(&self, owner_id: &str, patch: &ProfilePatch) -> Result<()> {
        let url = self.url(owner_id, "profile");
        self.send_ack(self.client.put(&url).json(patch)).await?;
        Ok(())
    }

    async fn fetch_sections(&self, owner_id: &str) -> Result<Option<Vec<StoredSection>>> {
        match self.get_json(self.url(owner_id, "sections")).await? {
            Some(value) => Ok(parse_stored_sections(&value)),
            None => Ok(None),
        }
    }

    async fn save_section(
        &self,
        owner_id: &str,
        section_id: &str,
        patch: &SectionPatch,
    ) -> Result<()> {
        let url = self.url(owner_id, &format!("sections/{section_id}"));
        self.send_ack(self.client.put(&url).json(patch)).await?;
        Ok(())
    }

    async fn create_section(&self, owner_id: &str, draft: &SectionDraft) -> Result<String> {
        let url = self.url(owner_id, "sections");
        let ack = self.send_ack(self.client.post(&url).json(draft)).await?;
        ack.id.ok_or_else(|| {
            VitrineError::gateway("gateway did not return an id for the created section")
        })
    }

    async fn delete_section(&self, owner_id: &str, section_id: &str) -> Result<()> {
        let url = self.url(owner_id, &format!("sections/{section_id}"));
        self.send_ack(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn reorder_sections(&self, owner_id: &str, order: &[SectionOrder]) -> Result<()> {
        let url = self.url(owner_id, "sections/reorder");
        self.send_ack(self.client.put(&url).json(order)).await?;
        Ok(())
    }
}

/// `{success, error?, id?}` acknowledgement body of mutation endpoints.
#[derive(Debug, Deserialize)]
struct AckBody {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

fn map_transport_error(err: reqwest::Error) -> VitrineError {
    VitrineError::gateway(format!("gateway request failed: {err}"))
}

/// Parses a JSON body after confirming the gateway actually declared one.
async fn read_json_body(response: Response) -> Result<Value> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);
    if !is_json {
        return Err(VitrineError::gateway_status(
            status.as_u16(),
            "gateway answered with a non-JSON body",
        ));
    }
    response
        .json::<Value>()
        .await
        .map_err(|err| VitrineError::gateway(format!("failed to parse gateway response: {err}")))
}

async fn error_from_response(response: Response) -> VitrineError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "failed to read gateway error body".to_string());
    let message = serde_json::from_str::<AckBody>(&body)
        .ok()
        .and_then(|ack| ack.error)
        .unwrap_or(body);
    VitrineError::gateway_status(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_url_building() {
        let gateway = HttpContentGateway::new(
            GatewayConfig::new("https://content.example.edu/api/").with_timeout(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(
            gateway.url("owner-1", "sections/reorder"),
            "https://content.example.edu/api/owners/owner-1/sections/reorder"
        );
    }

    #[test]
    fn test_ack_body_defaults_to_failure() {
        let ack: AckBody = serde_json::from_str("{}").unwrap();
        assert!(!ack.success);
        assert!(ack.error.is_none());
        assert!(ack.id.is_none());
    }

    #[test]
    fn test_ack_body_carries_generated_id() {
        let ack: AckBody =
            serde_json::from_str(r#"{ "success": true, "id": "sec-123" }"#).unwrap();
        assert!(ack.success);
        assert_eq!(ack.id.as_deref(), Some("sec-123"));
    }
}
