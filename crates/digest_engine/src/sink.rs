use std::path::{Path, PathBuf};

use digest_core::Report;
use digest_logging::digest_info;

use crate::filename::{report_filename, REPORT_FILE_PREFIX};
use crate::persist::AtomicFileWriter;
use crate::types::SinkError;

/// Persists an assembled report under a destination directory and returns
/// the path of the written file.
pub trait DocumentSink {
    fn write(&self, report: &Report, destination: &Path) -> Result<PathBuf, SinkError>;
}

/// Output format selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Markdown,
    Json,
}

impl DocumentFormat {
    /// Sink for this format naming its files `{prefix}_{timestamp}.{ext}`.
    pub fn sink(self, prefix: &str) -> Box<dyn DocumentSink> {
        match self {
            DocumentFormat::Markdown => Box::new(TextDocumentSink::new(prefix)),
            DocumentFormat::Json => Box::new(JsonDocumentSink::new(prefix)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextDocumentSink {
    prefix: String,
}

impl TextDocumentSink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for TextDocumentSink {
    fn default() -> Self {
        Self::new(REPORT_FILE_PREFIX)
    }
}

impl DocumentSink for TextDocumentSink {
    fn write(&self, report: &Report, destination: &Path) -> Result<PathBuf, SinkError> {
        let filename = report_filename(&self.prefix, report.generated_at, "md");
        write_document(destination, &filename, &report.render_text())
    }
}

#[derive(Debug, Clone)]
pub struct JsonDocumentSink {
    prefix: String,
}

impl JsonDocumentSink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for JsonDocumentSink {
    fn default() -> Self {
        Self::new(REPORT_FILE_PREFIX)
    }
}

impl DocumentSink for JsonDocumentSink {
    fn write(&self, report: &Report, destination: &Path) -> Result<PathBuf, SinkError> {
        let filename = report_filename(&self.prefix, report.generated_at, "json");
        let content = serde_json::to_string_pretty(report)?;
        write_document(destination, &filename, &content)
    }
}

fn write_document(destination: &Path, filename: &str, content: &str) -> Result<PathBuf, SinkError> {
    let writer = AtomicFileWriter::new(destination.to_path_buf());
    let path = writer.write(filename, content)?;
    digest_info!("Wrote report to {:?} ({} bytes)", path, content.len());
    Ok(path)
}
