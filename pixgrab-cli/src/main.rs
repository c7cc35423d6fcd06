// ABOUTME: Main entry point for the pixgrab CLI application
// ABOUTME: Wires config, logging, the core dispatcher, and the downloader into subcommands

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use pixgrab_core::{
    classify, route, Dispatcher, ExtractError, Fetcher, ImageCandidate, StrategyEndpoints,
};
use std::env;
use std::path::PathBuf;

use pixgrab_cli::cli::{Cli, Commands};
use pixgrab_cli::cli_output::CliOutput;
use pixgrab_cli::completions::{generate_completions, installation_instructions};
use pixgrab_cli::config::Config;
use pixgrab_cli::download::{save_image, FetchedImage, ImageDownloader};
use pixgrab_cli::output::{format_file_reports, formatter_for, FileReport, ImageReport};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_color = !cli.no_color
        && env::var("NO_COLOR").is_err()
        && env::var("TERM").unwrap_or_default() != "dumb";
    let out = if use_color {
        CliOutput::new()
    } else {
        CliOutput::with_color(false)
    };

    if let Err(err) = run(cli, use_color, &out) {
        out.error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli, use_color: bool, out: &CliOutput) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let timeout = cli
        .timeout
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| config.timeout());

    match cli.command {
        Commands::Resolve { url, json, pretty } => {
            let dispatcher = build_dispatcher(&config, timeout)?;
            let candidates = resolve_candidates(&dispatcher, &url);
            if candidates.is_empty() {
                out.no_images();
                return Ok(());
            }

            let json = json || config.prefers_json();
            println!(
                "{}",
                formatter_for(json, pretty, use_color).format_candidates(&candidates)?
            );
        }
        Commands::Inspect { url, json, pretty } => {
            let dispatcher = build_dispatcher(&config, timeout)?;
            let downloader = build_downloader(&config, timeout)?;

            let Some(images) = fetch_images(&dispatcher, &downloader, &url, out) else {
                return Ok(());
            };
            let reports: Vec<ImageReport> = images
                .iter()
                .enumerate()
                .map(|(i, image)| ImageReport::from_fetched(i + 1, image))
                .collect();

            let json = json || config.prefers_json();
            println!(
                "{}",
                formatter_for(json, pretty, use_color).format_reports(&reports)?
            );
        }
        Commands::Save { url, dir } => {
            let dispatcher = build_dispatcher(&config, timeout)?;
            let downloader = build_downloader(&config, timeout)?;
            let dir = dir
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));

            let Some(images) = fetch_images(&dispatcher, &downloader, &url, out) else {
                return Ok(());
            };

            let mut reports = Vec::with_capacity(images.len());
            for (i, image) in images.iter().enumerate() {
                let path = save_image(&dir, &image.file_name(), &image.bytes)?;
                out.success(&format!("{} ({})", path.display(), image.resolution.tier));
                reports.push(ImageReport::from_fetched(i + 1, image).with_saved_path(path));
            }

            println!(
                "{}",
                formatter_for(config.prefers_json(), false, use_color).format_reports(&reports)?
            );
        }
        Commands::Classify { files, json } => {
            let mut reports = Vec::with_capacity(files.len());
            for path in files {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("Failed to read image file: {}", path.display()))?;
                let resolution = classify(&bytes);
                reports.push(FileReport {
                    path,
                    width: resolution.width,
                    height: resolution.height,
                    tier: resolution.tier,
                });
            }

            let json = json || config.prefers_json();
            println!("{}", format_file_reports(&reports, json, use_color)?);
        }
        Commands::Route { url } => {
            println!("{}", route(url.trim()));
        }
        Commands::Completions { shell } => match shell {
            Some(shell) => {
                let mut cmd = Cli::command();
                generate_completions(shell, &mut cmd, &mut std::io::stdout());
            }
            None => print!("{}", installation_instructions()),
        },
    }

    Ok(())
}

fn build_dispatcher(config: &Config, timeout: std::time::Duration) -> Result<Dispatcher> {
    let fetcher = match &config.user_agent {
        Some(agent) => Fetcher::builder()
            .timeout(timeout)
            .browser_user_agent(agent.clone())
            .build(),
        None => Fetcher::builder().timeout(timeout).build(),
    }
    .context("Failed to create HTTP client")?;

    Ok(Dispatcher::with_fetcher(fetcher, StrategyEndpoints::default()))
}

fn build_downloader(config: &Config, timeout: std::time::Duration) -> Result<ImageDownloader> {
    ImageDownloader::new(
        timeout,
        config.user_agent.as_deref(),
        config.max_image_size_bytes(),
    )
}

/// Candidates for `url`, logging the cause and a hint when there are none
fn resolve_candidates(dispatcher: &Dispatcher, url: &str) -> Vec<ImageCandidate> {
    match dispatcher.try_resolve(url) {
        Ok(candidates) => candidates,
        Err(err) => {
            let hint = err.help_text().unwrap_or("no further details");
            if matches!(err, ExtractError::NoCandidatesFound { .. }) {
                log::debug!("{}: {} ({})", url, err, hint);
            } else {
                log::warn!("{}: {} ({})", url, err, hint);
            }
            Vec::new()
        }
    }
}

/// Resolve and download. `None` means the empty notice was already shown.
fn fetch_images(
    dispatcher: &Dispatcher,
    downloader: &ImageDownloader,
    url: &str,
    out: &CliOutput,
) -> Option<Vec<FetchedImage>> {
    let candidates = resolve_candidates(dispatcher, url);
    if candidates.is_empty() {
        out.no_images();
        return None;
    }

    let (images, failed) = downloader.fetch_all(&candidates);
    for (candidate, err) in &failed {
        out.warning(&format!("skipped {}: {:#}", candidate.source_url(), err));
    }

    if images.is_empty() {
        out.no_images();
        return None;
    }
    Some(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_dispatcher_applies_config() {
        let config = Config {
            user_agent: Some("pixgrab-test/1.0".to_string()),
            ..Default::default()
        };
        let dispatcher = build_dispatcher(&config, std::time::Duration::from_secs(3)).unwrap();

        let fetcher_config = dispatcher.fetcher().config();
        assert_eq!(fetcher_config.browser_user_agent, "pixgrab-test/1.0");
        assert_eq!(fetcher_config.timeout, std::time::Duration::from_secs(3));
    }

    #[test]
    fn test_build_dispatcher_default_identity() {
        let dispatcher =
            build_dispatcher(&Config::default(), std::time::Duration::from_secs(10)).unwrap();
        assert_eq!(
            dispatcher.fetcher().config().browser_user_agent,
            pixgrab_core::constants::identity::BROWSER_USER_AGENT
        );
    }

    #[test]
    fn test_fetch_images_empty_for_unresolvable_url() {
        let dispatcher = Dispatcher::new().unwrap();
        let downloader =
            ImageDownloader::new(std::time::Duration::from_secs(1), None, 1024).unwrap();
        let out = CliOutput::with_color(false);

        // YouTube URL without a video id yields no candidates and no network traffic
        let images = fetch_images(&dispatcher, &downloader, "https://youtube.com/feed", &out);
        assert!(images.is_none());
    }
}
