// ABOUTME: Builder pattern implementation for Fetcher configuration
// ABOUTME: Provides typed configuration of timeouts, identities, and redirects

use crate::constants::{identity, timeouts};
use crate::error::ExtractError;
use crate::fetcher::Fetcher;
use std::time::Duration;
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, TypedBuilder)]
#[builder(build_method(into = Result<Fetcher, ExtractError>))]
pub struct FetcherConfig {
    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = identity::BROWSER_USER_AGENT.to_string(), setter(into))]
    pub browser_user_agent: String,

    #[builder(default = identity::GENERIC_USER_AGENT.to_string(), setter(into))]
    pub generic_user_agent: String,

    #[builder(default = timeouts::MAX_REDIRECTS)]
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: timeouts::HTTP_REQUEST_TIMEOUT,
            browser_user_agent: identity::BROWSER_USER_AGENT.to_string(),
            generic_user_agent: identity::GENERIC_USER_AGENT.to_string(),
            max_redirects: timeouts::MAX_REDIRECTS,
        }
    }
}

impl From<FetcherConfig> for Result<Fetcher, ExtractError> {
    fn from(config: FetcherConfig) -> Self {
        Fetcher::from_config(config)
    }
}

impl Fetcher {
    pub fn builder() -> FetcherConfigBuilder<((), (), (), ())> {
        FetcherConfig::builder()
    }
}
