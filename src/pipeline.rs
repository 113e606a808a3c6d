//! Orchestration: discover chapters, then render them in order, honoring the resume marker.
//!
//! Chapter numbers are positions in the freshly fetched TOC. If the remote site reorders,
//! adds or removes entries between runs, a resume marker can match a different chapter
//! than it did before.

use crate::config::Settings;
use crate::crawl::{find_chapters, CrawlError, PageClient};
use crate::model::Chapter;
use crate::naming::pdf_file_name;
use crate::render::{chapter_url, save_chapter_as_pdf, PdfRenderer, RenderError};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Crawl(#[from] CrawlError),

    /// First chapter that failed to render. No later chapter was attempted.
    #[error("An error of type {} occurred rendering {}. Arguments: {:?}", .source.kind(), .file.display(), .source.arguments())]
    Render {
        chapter: u32,
        file: PathBuf,
        #[source]
        source: RenderError,
    },
}

/// What a download pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DownloadSummary {
    pub rendered: u32,
    pub skipped: u32,
    /// False only when a non-empty resume marker never matched any file name.
    pub resume_matched: bool,
}

/// Render `chapters` in order.
///
/// With an empty `settings.resume_marker` every chapter is rendered. Otherwise chapters are
/// skipped until one whose file name contains the marker; that chapter and all after it are
/// rendered. Stops at the first render failure.
pub fn download_chapters(
    chapters: &[String],
    settings: &Settings,
    renderer: &mut dyn PdfRenderer,
) -> Result<DownloadSummary, PipelineError> {
    let marker = settings.resume_marker.as_str();
    let mut download_html = marker.is_empty();
    let mut summary = DownloadSummary::default();

    let mut chapter_num: u32 = 1;
    for href in chapters {
        let pdf_name = pdf_file_name(&settings.output_dir, chapter_num, href);

        if !download_html && pdf_name.to_string_lossy().contains(marker) {
            info!("Resuming at {}", pdf_name.display());
            download_html = true;
        }

        if download_html {
            info!("Downloading {}", pdf_name.display());
            save_chapter_as_pdf(renderer, &settings.domain_prefix, href, &pdf_name).map_err(
                |e| PipelineError::Render {
                    chapter: chapter_num,
                    file: pdf_name.clone(),
                    source: e,
                },
            )?;
            summary.rendered += 1;
        } else {
            debug!("Skipping {}", pdf_name.display());
            summary.skipped += 1;
        }

        chapter_num += 1;
    }

    summary.resume_matched = download_html;
    if !download_html {
        warn!(
            "Resume marker {:?} matched none of {} chapters; nothing was rendered",
            marker,
            chapters.len()
        );
    }
    Ok(summary)
}

/// Number the chapters the way [download_chapters] would, without rendering anything.
pub fn list_chapters(chapters: &[String], settings: &Settings) -> Vec<Chapter> {
    chapters
        .iter()
        .zip(1u32..)
        .map(|(href, index)| Chapter {
            index,
            href: href.clone(),
            url: chapter_url(&settings.domain_prefix, href),
            file: pdf_file_name(&settings.output_dir, index, href),
        })
        .collect()
}

/// Fetch the TOC and render every chapter from the resume point on.
pub fn run(
    settings: &Settings,
    client: &PageClient,
    renderer: &mut dyn PdfRenderer,
) -> Result<DownloadSummary, PipelineError> {
    let chapters = find_chapters(client, settings)?;
    download_chapters(&chapters, settings, renderer)
}
