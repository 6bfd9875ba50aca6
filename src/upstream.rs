//! Client for the upstream realtime speech API (ephemeral token minting).

use crate::config::UpstreamConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;

/// Mints short-lived client credentials from the upstream speech service.
///
/// Trait seam so the session manager can be exercised without network
/// access; the real implementation is `RealtimeTokenIssuer`.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Request an ephemeral session from upstream. Returns the raw payload
    /// (it carries the `client_secret` the browser uses for WebRTC setup).
    async fn mint(&self) -> Result<serde_json::Value>;
}

pub struct RealtimeTokenIssuer {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    voice: String,
    instructions: String,
}

impl RealtimeTokenIssuer {
    pub fn from_config(cfg: &UpstreamConfig) -> Result<Self> {
        let api_key =
            std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_base: cfg.api_base.clone(),
            api_key,
            model: cfg.model.clone(),
            voice: cfg.voice.clone(),
            instructions: cfg.instructions.clone(),
        })
    }
}

#[async_trait]
impl TokenIssuer for RealtimeTokenIssuer {
    async fn mint(&self) -> Result<serde_json::Value> {
        let url = format!("{}/realtime/sessions", self.api_base);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "voice": self.voice,
                "instructions": self.instructions,
            }))
            .send()
            .await
            .context("Upstream realtime API unreachable")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Upstream realtime API returned {}: {}", status, body);
        }

        response
            .json()
            .await
            .context("Invalid JSON from upstream realtime API")
    }
}
