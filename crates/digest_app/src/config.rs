use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::ValueEnum;
use digest_core::{
    CategoryRule, CategoryTable, Pipeline, TextCleaner, DEFAULT_EXCLUSION, DEFAULT_FALLBACK,
    DEFAULT_MARKER,
};
use digest_engine::{AtomicFileWriter, DocumentFormat, REPORT_FILE_PREFIX};
use digest_logging::{digest_info, digest_warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "news_digest.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn document_format(self) -> DocumentFormat {
        match self {
            ReportFormat::Markdown => DocumentFormat::Markdown,
            ReportFormat::Json => DocumentFormat::Json,
        }
    }
}

/// Settings read from the RON configuration file. Absent fields take their
/// default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub marker: char,
    pub exclusions: Vec<String>,
    pub categories: Vec<CategoryRule>,
    pub fallback: String,
    pub format: ReportFormat,
    pub destination: Option<PathBuf>,
    /// Report files are named `{file_prefix}_{YYYYmmdd_HHMMSS}.{ext}`.
    pub file_prefix: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            exclusions: vec![DEFAULT_EXCLUSION.to_string()],
            categories: CategoryTable::default().rules,
            fallback: DEFAULT_FALLBACK.to_string(),
            format: ReportFormat::default(),
            destination: None,
            file_prefix: REPORT_FILE_PREFIX.to_string(),
        }
    }
}

impl DigestConfig {
    pub fn pipeline(&self) -> Pipeline {
        let cleaner = TextCleaner::new(self.marker, self.exclusions.clone());
        let table = CategoryTable::new(self.categories.clone(), self.fallback.clone());
        Pipeline::new(cleaner, table)
    }
}

/// Reads the configuration at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<DigestConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            digest_info!("No configuration at {:?}; using defaults", path);
            return Ok(DigestConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading configuration {}", path.display()))
        }
    };

    let config: DigestConfig = ron::from_str(&content)
        .with_context(|| format!("parsing configuration {}", path.display()))?;
    if config.categories.is_empty() {
        digest_warn!(
            "Configuration {:?} has no categories; every item goes to {}",
            path,
            config.fallback
        );
    }
    digest_info!("Loaded configuration from {:?}", path);
    Ok(config)
}

/// Writes the default configuration to `path`, which must not exist yet.
pub fn write_default_config(path: &Path) -> anyhow::Result<PathBuf> {
    if path.exists() {
        bail!("{} already exists; not overwriting it", path.display());
    }
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("{} is not a file path", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&DigestConfig::default(), pretty)
        .context("serializing default configuration")?;
    let written = AtomicFileWriter::new(dir)
        .write(filename, &content)
        .with_context(|| format!("writing {}", path.display()))?;
    digest_info!("Wrote default configuration to {:?}", written);
    Ok(written)
}
