// ABOUTME: Dispatcher that routes an input URL to exactly one extraction strategy
// ABOUTME: Normalizes every strategy failure to an empty result after logging the cause

use crate::error::{ExtractError, Result};
use crate::fetcher::Fetcher;
use crate::strategies::{
    GenericHtmlStrategy, InstagramStrategy, RedditStrategy, SourceStrategy, StrategyEndpoints,
    TwitterStrategy, YouTubeStrategy,
};
use crate::types::{ImageCandidate, Platform};

/// Host substrings checked in priority order; the first hit wins
const ROUTES: &[(Platform, &[&str])] = &[
    (Platform::Instagram, &["instagram.com"]),
    (Platform::Reddit, &["reddit.com"]),
    (Platform::Twitter, &["x.com", "twitter.com"]),
    (Platform::YouTube, &["youtube.com", "youtu.be"]),
];

/// Pick the strategy for `url` by substring match, falling back to generic HTML
pub fn route(url: &str) -> Platform {
    ROUTES
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| url.contains(needle)))
        .map(|(platform, _)| *platform)
        .unwrap_or(Platform::Generic)
}

pub struct Dispatcher {
    fetcher: Fetcher,
    endpoints: StrategyEndpoints,
}

impl Dispatcher {
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(Fetcher::new()?, StrategyEndpoints::default()))
    }

    pub fn with_fetcher(fetcher: Fetcher, endpoints: StrategyEndpoints) -> Self {
        Self { fetcher, endpoints }
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub fn strategy_for(&self, platform: Platform) -> Box<dyn SourceStrategy + '_> {
        match platform {
            Platform::Generic => Box::new(GenericHtmlStrategy::new(&self.fetcher)),
            Platform::Instagram => Box::new(InstagramStrategy::new(&self.fetcher, &self.endpoints)),
            Platform::YouTube => Box::new(YouTubeStrategy::new(&self.endpoints)),
            Platform::Reddit => Box::new(RedditStrategy::new(&self.fetcher)),
            Platform::Twitter => Box::new(TwitterStrategy::new(&self.fetcher)),
        }
    }

    /// Route and extract, keeping the failure cause. An empty extraction is
    /// reported as `NoCandidatesFound`.
    pub fn try_resolve(&self, url: &str) -> Result<Vec<ImageCandidate>> {
        let url = url.trim();
        let platform = route(url);
        log::debug!("Routing {} to {} strategy", url, platform);

        self.resolve_with(platform, url)
    }

    /// Extract with an explicitly chosen strategy, bypassing routing
    pub fn resolve_with(&self, platform: Platform, url: &str) -> Result<Vec<ImageCandidate>> {
        let strategy = self.strategy_for(platform);
        let platform = strategy.platform();
        let raw = strategy.extract(url)?;

        let candidates: Vec<ImageCandidate> = raw
            .into_iter()
            .filter_map(|source| match ImageCandidate::new(source, platform) {
                Ok(candidate) => Some(candidate),
                Err(err) => {
                    log::warn!("Dropping {} candidate: {}", platform, err);
                    None
                }
            })
            .collect();

        if candidates.is_empty() {
            return Err(ExtractError::no_candidates(
                platform,
                "strategy returned no usable URLs",
            ));
        }
        Ok(candidates)
    }

    /// Candidates for `url`, or an empty list. Failures never escape; they are
    /// logged with their cause.
    pub fn resolve(&self, url: &str) -> Vec<ImageCandidate> {
        match self.try_resolve(url) {
            Ok(candidates) => {
                log::debug!("Resolved {} candidate(s) for {}", candidates.len(), url);
                candidates
            }
            Err(err @ ExtractError::NoCandidatesFound { .. }) => {
                log::debug!("{} ({})", err, url);
                Vec::new()
            }
            Err(err) => {
                log::warn!(
                    "Extraction failed for {}: {} (transient: {})",
                    url,
                    err,
                    err.is_transient()
                );
                Vec::new()
            }
        }
    }
}
