use std::path::PathBuf;

use crate::{Report, SearchQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re-)establish the mail source and load its folder tree.
    Connect,
    FetchMessages { query: SearchQuery },
    WriteReport { report: Report, destination: PathBuf },
}
