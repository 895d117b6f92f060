use anyhow::{Context, Result};
use async_trait::async_trait;
use bip_api_types::HistoryResponse;
use bip_thread_sync::{HistorySource, REQUESTED_WITH};

/// Fetches the thread history over HTTP, optionally carrying a session cookie.
pub(crate) struct HttpHistorySource {
    url: String,
    session_cookie: Option<String>,
    http: reqwest::Client,
}

impl HttpHistorySource {
    pub(crate) fn new(url: &str, session_cookie: Option<String>) -> Self {
        Self {
            url: url.to_owned(),
            session_cookie,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait(?Send)]
impl HistorySource for HttpHistorySource {
    async fn fetch_history(&self) -> Result<HistoryResponse> {
        let (header, value) = REQUESTED_WITH;
        let mut request = self
            .http
            .get(&self.url)
            .header(header, value)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request.send().await.context("history transport")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("history HTTP {status}: {text}");
        }

        response.json().await.context("history parse")
    }
}
