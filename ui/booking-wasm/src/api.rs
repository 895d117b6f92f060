//! History endpoint client.
//!
//! Same-origin `fetch` through gloo-net; the session cookie rides along automatically.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use bip_api_types::HistoryResponse;
use bip_thread_sync::{HistorySource, REQUESTED_WITH};
use gloo_net::http::Request;

pub struct FetchHistorySource {
    url: String,
}

impl FetchHistorySource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl HistorySource for FetchHistorySource {
    async fn fetch_history(&self) -> Result<HistoryResponse> {
        let (header, value) = REQUESTED_WITH;
        let resp = Request::get(&self.url)
            .header(header, value)
            .send()
            .await
            .map_err(|e| anyhow!("history transport: {e}"))?;

        let text = resp
            .text()
            .await
            .map_err(|e| anyhow!("history body: {e}"))?;

        if !resp.ok() {
            anyhow::bail!("history HTTP {} {}: {}", resp.status(), resp.status_text(), text);
        }

        serde_json::from_str(&text).map_err(|e| anyhow!("history parse: {e}"))
    }
}
