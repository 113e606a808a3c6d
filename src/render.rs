//! HTML-to-PDF rendering of a single chapter through an external converter.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info};

/// Failure of one conversion. Returned to the caller; rendering never exits the process.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Could not run {}: {source}. Is it installed and on PATH?", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exited with {} for {url}: {stderr}", .program.display(), status_text(.code))]
    Converter {
        program: PathBuf,
        url: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn status_text(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {}", c),
        None => "no exit code (killed by signal)".to_string(),
    }
}

impl RenderError {
    /// Short name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::Spawn { .. } => "Spawn",
            RenderError::Converter { .. } => "Converter",
        }
    }

    /// The values the failure carries, in declaration order.
    pub fn arguments(&self) -> Vec<String> {
        match self {
            RenderError::Spawn { program, source } => {
                vec![program.display().to_string(), source.to_string()]
            }
            RenderError::Converter {
                program,
                url,
                code,
                stderr,
            } => vec![
                program.display().to_string(),
                url.clone(),
                status_text(code),
                stderr.clone(),
            ],
        }
    }
}

/// Something that can fetch `url` and write it to `output` as a PDF.
pub trait PdfRenderer {
    fn render(&mut self, url: &str, output: &Path) -> Result<(), RenderError>;
}

/// Renders through the `wkhtmltopdf` command-line tool.
#[derive(Debug, Clone)]
pub struct Wkhtmltopdf {
    program: PathBuf,
}

impl Wkhtmltopdf {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PdfRenderer for Wkhtmltopdf {
    fn render(&mut self, url: &str, output: &Path) -> Result<(), RenderError> {
        debug!(program = %self.program.display(), url, "running converter");
        let out = Command::new(&self.program)
            .arg("--quiet")
            .arg(url)
            .arg(output)
            .output()
            .map_err(|e| RenderError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;
        if out.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&out.stderr);
        let stdout = String::from_utf8_lossy(&out.stdout);
        let msg = if stderr.trim().is_empty() { stdout } else { stderr };
        Err(RenderError::Converter {
            program: self.program.clone(),
            url: url.to_string(),
            code: out.status.code(),
            stderr: msg.trim().to_string(),
        })
    }
}

/// Absolute URL of a chapter: plain concatenation of the domain prefix and the relative href.
pub fn chapter_url(domain_prefix: &str, href: &str) -> String {
    format!("{}{}", domain_prefix, href)
}

/// Render one chapter to `pdf_name`, logging the file on success.
pub fn save_chapter_as_pdf(
    renderer: &mut dyn PdfRenderer,
    domain_prefix: &str,
    href: &str,
    pdf_name: &Path,
) -> Result<(), RenderError> {
    let url = chapter_url(domain_prefix, href);
    renderer.render(&url, pdf_name)?;
    info!("- Downloaded {}", pdf_name.display());
    Ok(())
}
