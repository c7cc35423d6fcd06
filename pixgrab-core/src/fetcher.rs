// ABOUTME: Blocking HTTP client shared by every strategy and by byte retrieval
// ABOUTME: Applies a fixed timeout and a spoofed client identity to each GET

use crate::builder::FetcherConfig;
use crate::error::{ExtractError, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, USER_AGENT};

/// Which User-Agent a request presents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientIdentity {
    /// Full desktop browser string
    Browser,
    /// Bare `Mozilla/5.0`
    Generic,
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::from_config(FetcherConfig::default())
    }

    pub fn from_config(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.browser_user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| ExtractError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    fn user_agent(&self, identity: ClientIdentity) -> &str {
        match identity {
            ClientIdentity::Browser => &self.config.browser_user_agent,
            ClientIdentity::Generic => &self.config.generic_user_agent,
        }
    }

    /// GET `url` and return the body as text. Any non-2xx status is an error.
    pub fn get_text(&self, url: &str, identity: ClientIdentity) -> Result<String> {
        let response = self.send(url, identity, &[])?;
        Ok(response.text()?)
    }

    /// GET `url` and decode the body as JSON, with extra request headers
    pub fn get_json(
        &self,
        url: &str,
        identity: ClientIdentity,
        headers: &[(&str, &str)],
    ) -> Result<serde_json::Value> {
        let response = self.send(url, identity, headers)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET raw bytes with the browser identity
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.send(url, ClientIdentity::Browser, &[])?;
        Ok(response.bytes()?.to_vec())
    }

    fn send(
        &self,
        url: &str,
        identity: ClientIdentity,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        log::debug!("GET {} ({:?} identity)", url, identity);

        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent(identity));
        if !headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("accept")) {
            request = request.header(ACCEPT, "*/*");
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}
