//! docs2pdf: crawl a documentation manual's table of contents and render each chapter to PDF.

pub mod cli;
pub mod config;
pub mod crawl;
pub mod logging;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod render;

// Re-exports for CLI and consumers.
pub use config::Settings;
pub use crawl::{find_chapters, CrawlError, PageClient, PageClientBuilder};
pub use naming::pdf_file_name;
pub use pipeline::{download_chapters, DownloadSummary, PipelineError};
pub use render::{PdfRenderer, RenderError, Wkhtmltopdf};
