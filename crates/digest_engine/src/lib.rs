//! Digest engine: mail-source and document-sink collaborators, and effect execution.
mod convert;
mod engine;
mod filename;
mod maildir;
mod persist;
mod sink;
mod source;
mod types;

pub use convert::{Converter, Html2MdConverter};
pub use engine::Engine;
pub use filename::{report_filename, REPORT_FILE_PREFIX};
pub use maildir::{is_maildir, parse_message, MaildirConnector, MaildirSource};
pub use persist::{check_output_dir, AtomicFileWriter, PersistError};
pub use sink::{DocumentFormat, DocumentSink, JsonDocumentSink, TextDocumentSink};
pub use source::{MailConnector, MailSource};
pub use types::{SinkError, SourceError};
