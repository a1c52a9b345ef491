use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};
use digest_core::{build_folder_tree, FolderId, FolderNode, MailFolder, RawMessage, SearchQuery};
use digest_logging::{digest_debug, digest_warn};
use mailparse::{MailHeaderMap, MailParseError, ParsedMail};

use crate::convert::{Converter, Html2MdConverter};
use crate::source::{MailConnector, MailSource};
use crate::types::SourceError;

const ROOT_ID: &str = ".";
const MESSAGE_DIRS: [&str; 2] = ["new", "cur"];
const RESERVED_DIRS: [&str; 3] = ["cur", "new", "tmp"];

/// True when `dir` holds a `cur` or `new` sub-directory.
pub fn is_maildir(dir: &Path) -> bool {
    MESSAGE_DIRS.iter().any(|sub| dir.join(sub).is_dir())
}

/// Opens a Maildir tree rooted at a directory.
pub struct MaildirConnector {
    root: PathBuf,
}

impl MaildirConnector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MailConnector for MaildirConnector {
    fn connect(&self) -> Result<Box<dyn MailSource>, SourceError> {
        if !self.root.is_dir() {
            return Err(SourceError::StoreMissing(self.root.clone()));
        }
        Ok(Box::new(MaildirSource::new(self.root.clone())))
    }
}

/// Mail source backed by nested Maildir directories.
pub struct MaildirSource {
    root: PathBuf,
    converter: Arc<dyn Converter>,
}

impl MaildirSource {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            converter: Arc::new(Html2MdConverter),
        }
    }

    pub fn with_converter(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converter = converter;
        self
    }

    fn folder_path(&self, id: &FolderId) -> Result<PathBuf, SourceError> {
        if id.as_str() == ROOT_ID {
            return Ok(self.root.clone());
        }
        let relative = Path::new(id.as_str());
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        let path = self.root.join(relative);
        if !plain || !path.is_dir() {
            return Err(SourceError::UnknownFolder(id.to_string()));
        }
        Ok(path)
    }

    fn read_message(&self, path: &Path) -> Option<RawMessage> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                digest_warn!("Skipping unreadable message {:?}: {}", path, err);
                return None;
            }
        };
        let fallback = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map(local_time)
            .unwrap_or_else(|_| Local::now().naive_local());

        match parse_message(&bytes, fallback, self.converter.as_ref()) {
            Ok(message) => Some(message),
            Err(err) => {
                digest_warn!("Skipping unparsable message {:?}: {}", path, err);
                None
            }
        }
    }
}

impl MailSource for MaildirSource {
    fn account_name(&self) -> String {
        self.root.display().to_string()
    }

    fn list_folders(&self) -> Result<FolderNode, SourceError> {
        let root = MaildirFolder {
            root: self.root.clone(),
            relative: PathBuf::new(),
        };
        build_folder_tree(&root).ok_or(SourceError::NoFolders)
    }

    fn fetch_messages(&self, query: &SearchQuery) -> Result<Vec<RawMessage>, SourceError> {
        let folder = self.folder_path(&query.folder)?;
        let mut messages = Vec::new();
        let mut scanned = 0usize;

        for sub in MESSAGE_DIRS {
            let dir = folder.join(sub);
            if !dir.is_dir() {
                continue;
            }
            for entry in fs::read_dir(&dir).map_err(|e| SourceError::io(&dir, e))? {
                let entry = entry.map_err(|e| SourceError::io(&dir, e))?;
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                scanned += 1;
                if let Some(message) = self.read_message(&path) {
                    if query.matches(&message) {
                        messages.push(message);
                    }
                }
            }
        }

        messages.sort_by(|a, b| b.received_at.cmp(&a.received_at));
        digest_debug!(
            "Folder {} matched {} of {} message(s)",
            query.folder,
            messages.len(),
            scanned
        );
        Ok(messages)
    }
}

/// Parses one RFC 5322 message. The received time comes from the `Date`
/// header in local time, or `fallback_time` when the header is missing or
/// unreadable.
pub fn parse_message(
    bytes: &[u8],
    fallback_time: NaiveDateTime,
    converter: &dyn Converter,
) -> Result<RawMessage, MailParseError> {
    let parsed = mailparse::parse_mail(bytes)?;
    let subject = parsed
        .headers
        .get_first_header("Subject")
        .map(|header| header.get_value_utf8().unwrap_or_else(|_| header.get_value()))
        .unwrap_or_default();
    let received_at = parsed
        .headers
        .get_first_value("Date")
        .and_then(|value| mailparse::dateparse(&value).ok())
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .unwrap_or(fallback_time);

    let body = match find_part(&parsed, "text/plain")? {
        Some(text) => Some(text),
        None => find_part(&parsed, "text/html")?.map(|html| converter.to_text(&html)),
    };

    Ok(RawMessage::new(subject, body, received_at))
}

fn find_part(mail: &ParsedMail, mimetype: &str) -> Result<Option<String>, MailParseError> {
    if mail.subparts.is_empty() {
        if mail.ctype.mimetype.eq_ignore_ascii_case(mimetype) {
            return mail.get_body().map(Some);
        }
        return Ok(None);
    }
    for part in &mail.subparts {
        if let Some(body) = find_part(part, mimetype)? {
            return Ok(Some(body));
        }
    }
    Ok(None)
}

fn local_time(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}

struct MaildirFolder {
    root: PathBuf,
    relative: PathBuf,
}

impl MaildirFolder {
    fn path(&self) -> PathBuf {
        self.root.join(&self.relative)
    }
}

impl MailFolder for MaildirFolder {
    type Error = SourceError;

    fn name(&self) -> Result<String, SourceError> {
        let named = if self.relative.as_os_str().is_empty() {
            self.root.file_name()
        } else {
            self.relative.file_name()
        };
        Ok(named
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Inbox".to_string()))
    }

    fn id(&self) -> Result<FolderId, SourceError> {
        if self.relative.as_os_str().is_empty() {
            return Ok(FolderId::new(ROOT_ID));
        }
        let parts: Vec<String> = self
            .relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Ok(FolderId::new(parts.join("/")))
    }

    fn subfolders(&self) -> Result<Vec<Self>, SourceError> {
        let dir = self.path();
        let mut children = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| SourceError::io(&dir, e))? {
            let entry = entry.map_err(|e| SourceError::io(&dir, e))?;
            let name = entry.file_name();
            let path = entry.path();
            if RESERVED_DIRS.iter().any(|r| name == *r) || !path.is_dir() || !is_maildir(&path) {
                continue;
            }
            children.push(MaildirFolder {
                root: self.root.clone(),
                relative: self.relative.join(&name),
            });
        }
        children.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(children)
    }
}
