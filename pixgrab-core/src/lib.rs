// ABOUTME: pixgrab core library finding the largest public images behind a page or post URL
// ABOUTME: Exposes the routing dispatcher, per-platform strategies, and the resolution classifier

pub mod builder;
pub mod classifier;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod router;
pub mod strategies;
pub mod types;

#[cfg(test)]
mod test_helpers;

pub use builder::FetcherConfig;
pub use classifier::classify;
pub use error::{ExtractError, Result};
pub use fetcher::{ClientIdentity, Fetcher};
pub use router::{route, Dispatcher};
pub use strategies::{SourceStrategy, StrategyEndpoints};
pub use types::{ImageCandidate, Platform, Resolution, Tier};

/// Resolve `url` to candidate image URLs with default settings.
///
/// Never fails: an unreachable host, an unsupported path, or a page with no
/// images all produce an empty list. Use [`Dispatcher::try_resolve`] to see why.
pub fn resolve_images(url: &str) -> Vec<ImageCandidate> {
    match Dispatcher::new() {
        Ok(dispatcher) => dispatcher.resolve(url),
        Err(err) => {
            log::warn!("Could not build HTTP client: {}", err);
            Vec::new()
        }
    }
}
