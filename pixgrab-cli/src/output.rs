// ABOUTME: This module handles output formatting for the pixgrab CLI
// ABOUTME: It renders candidate lists and image reports as colored tables or JSON

use anyhow::Result;
use owo_colors::OwoColorize;
use pixgrab_core::{ImageCandidate, Platform, Tier};
use serde::Serialize;
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::download::{format_bytes, FetchedImage};

/// One fetched and classified image, as printed by `inspect` and `save`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    pub index: usize,
    pub platform: Platform,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tier: Tier,
    pub size_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<PathBuf>,
}

impl ImageReport {
    pub fn from_fetched(index: usize, image: &FetchedImage) -> Self {
        Self {
            index,
            platform: image.candidate.platform_hint(),
            url: image.candidate.source_url().to_string(),
            width: image.resolution.width,
            height: image.resolution.height,
            tier: image.resolution.tier.clone(),
            size_bytes: image.bytes.len(),
            content_type: image.content_type.clone(),
            saved_to: None,
        }
    }

    pub fn with_saved_path(mut self, path: PathBuf) -> Self {
        self.saved_to = Some(path);
        self
    }
}

pub trait OutputFormat {
    fn format_candidates(&self, candidates: &[ImageCandidate]) -> Result<String>;
    fn format_reports(&self, reports: &[ImageReport]) -> Result<String>;
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn truncate_url(url: &str, max_len: usize) -> String {
        if url.chars().count() <= max_len {
            url.to_string()
        } else {
            let head: String = url.chars().take(max_len - 3).collect();
            format!("{}...", head)
        }
    }

    fn format_tier(&self, tier: &Tier) -> String {
        if !self.use_color {
            return tier.to_string();
        }
        match tier {
            Tier::Uhd4k => tier.to_string().magenta().bold().to_string(),
            Tier::Fhd1080p => tier.to_string().green().to_string(),
            Tier::Hd720p => tier.to_string().yellow().to_string(),
            Tier::Dimensions { .. } => tier.to_string(),
            Tier::Unknown => tier.to_string().dimmed().to_string(),
        }
    }

    fn format_platform(&self, platform: Platform) -> String {
        if self.use_color {
            platform.to_string().cyan().to_string()
        } else {
            platform.to_string()
        }
    }

    fn format_dimensions(&self, width: Option<u32>, height: Option<u32>) -> String {
        match (width, height) {
            (Some(w), Some(h)) => format!("{}×{}", w, h),
            _ if self.use_color => "-".dimmed().to_string(),
            _ => "-".to_string(),
        }
    }
}

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "URL")]
    url: String,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Resolution")]
    resolution: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl OutputFormat for TableFormatter {
    fn format_candidates(&self, candidates: &[ImageCandidate]) -> Result<String> {
        let rows: Vec<CandidateRow> = candidates
            .iter()
            .enumerate()
            .map(|(i, candidate)| CandidateRow {
                index: i + 1,
                platform: self.format_platform(candidate.platform_hint()),
                url: candidate.source_url().to_string(),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }

    fn format_reports(&self, reports: &[ImageReport]) -> Result<String> {
        let rows: Vec<ReportRow> = reports
            .iter()
            .map(|report| ReportRow {
                index: report.index,
                platform: self.format_platform(report.platform),
                resolution: self.format_dimensions(report.width, report.height),
                tier: self.format_tier(&report.tier),
                size: format_bytes(report.size_bytes),
                url: Self::truncate_url(&report.url, 60),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_candidates(&self, candidates: &[ImageCandidate]) -> Result<String> {
        self.render(candidates)
    }

    fn format_reports(&self, reports: &[ImageReport]) -> Result<String> {
        self.render(reports)
    }
}

/// Pick the formatter for a command's `--json`/`--pretty` flags
pub fn formatter_for(json: bool, pretty: bool, use_color: bool) -> Box<dyn OutputFormat> {
    if json {
        Box::new(JsonFormatter::new(pretty))
    } else {
        Box::new(TableFormatter::new(use_color))
    }
}

/// Classification of a local file, as printed by `classify`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tier: Tier,
}

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Resolution")]
    resolution: String,
    #[tabled(rename = "Tier")]
    tier: String,
}

pub fn format_file_reports(reports: &[FileReport], json: bool, use_color: bool) -> Result<String> {
    if json {
        return JsonFormatter::new(true).render(reports);
    }

    let formatter = TableFormatter::new(use_color);
    let rows: Vec<FileRow> = reports
        .iter()
        .map(|report| FileRow {
            file: report.path.display().to_string(),
            resolution: formatter.format_dimensions(report.width, report.height),
            tier: formatter.format_tier(&report.tier),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    Ok(table.to_string())
}
