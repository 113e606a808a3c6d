//! Output file naming for rendered chapters.

use std::path::{Path, PathBuf};

/// Extension stripped from chapter hrefs before `.pdf` is appended.
const HTML_SUFFIX: &str = ".html";

/// `<output_dir>/<NNNNN>_<href with '/' as '_', trailing .html dropped>.pdf`.
///
/// `chapter_num` is 1-based and zero-padded to five digits. Pure: no filesystem access.
pub fn pdf_file_name(output_dir: &Path, chapter_num: u32, href: &str) -> PathBuf {
    let flat = href.replace('/', "_");
    let stem = flat.strip_suffix(HTML_SUFFIX).unwrap_or(&flat);
    output_dir.join(format!("{:05}_{}.pdf", chapter_num, stem))
}
