//! Chapter discovery: fetch the manual's index page and pull the chapter links out of its TOC.

mod client;
mod error;
mod toc;

pub use client::{PageClient, PageClientBuilder, DEFAULT_USER_AGENT};
pub use error::CrawlError;
pub use toc::{extract_chapter_links, prune_subchapters};

use crate::config::Settings;
use tracing::{debug, info};

/// Fetch `settings.start_url` and return the chapter hrefs in TOC order.
pub fn find_chapters(client: &PageClient, settings: &Settings) -> Result<Vec<String>, CrawlError> {
    debug!(url = %settings.start_url, "fetching index page");
    let html = client.fetch_page(&settings.start_url)?;
    let chapters = extract_chapter_links(&html, &settings.container_class)?;
    info!("Chapters to download: {}", chapters.len());
    Ok(chapters)
}
