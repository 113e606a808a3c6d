//! Chapter listing produced for `--dry-run`.

use serde::Serialize;
use std::path::PathBuf;

/// One chapter in TOC order, with the URL it is rendered from and the file it is written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    /// 1-based position in the TOC.
    pub index: u32,
    /// Relative link as it appears in the TOC.
    pub href: String,
    pub url: String,
    pub file: PathBuf,
}
