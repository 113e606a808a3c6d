//! Run settings and optional config file loading. Search order: ./docs2pdf.toml, then
//! $XDG_CONFIG_HOME/docs2pdf/config.toml (or ~/.config/docs2pdf/config.toml).

use crate::crawl::DEFAULT_USER_AGENT;
use serde::Deserialize;
use std::path::PathBuf;

/// Index page of the manual whose TOC lists the chapters.
pub const DEFAULT_START_URL: &str = "https://www.tradingview.com/pine-script-docs/en/v5/index.html";
/// Prefix joined with each relative chapter href.
pub const DEFAULT_DOMAIN_PREFIX: &str = "https://www.tradingview.com/pine-script-docs/en/v5/";
pub const DEFAULT_OUTPUT_DIR: &str = "./chapters";
pub const DEFAULT_CONTAINER_CLASS: &str = "toctree-wrapper";
pub const DEFAULT_CONVERTER: &str = "wkhtmltopdf";

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Index page URL.
    pub start_url: Option<String>,
    /// Prefix prepended to each chapter href to form its absolute URL.
    pub domain_prefix: Option<String>,
    /// Skip chapters until a computed file name contains this string.
    pub start_at_chapter: Option<String>,
    /// Directory receiving the PDFs. Must already exist. Paths are relative to CWD.
    pub output_dir: Option<PathBuf>,
    /// Class of the `div` wrapping the TOC anchors.
    pub container_class: Option<String>,
    /// HTTP User-Agent header for the index request.
    pub user_agent: Option<String>,
    /// Index request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,
    /// HTML-to-PDF converter program (name on PATH or full path).
    pub converter: Option<PathBuf>,
}

/// Search order: (1) ./docs2pdf.toml, (2) $XDG_CONFIG_HOME/docs2pdf/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("docs2pdf.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("docs2pdf").join("config.toml"));
    }
    for path in &paths {
        if path.exists() {
            let s = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            let config: Config = toml::from_str(&s)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
            return Ok(Some(config));
        }
    }
    Ok(None)
}

/// Fully resolved settings for one run, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub start_url: String,
    pub domain_prefix: String,
    /// Empty means start from chapter 1.
    pub resume_marker: String,
    pub output_dir: PathBuf,
    pub container_class: String,
    pub user_agent: String,
    pub timeout_secs: Option<u64>,
    pub converter: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            domain_prefix: DEFAULT_DOMAIN_PREFIX.to_string(),
            resume_marker: String::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            container_class: DEFAULT_CONTAINER_CLASS.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
            converter: PathBuf::from(DEFAULT_CONVERTER),
        }
    }
}

impl Settings {
    /// Defaults overridden by whatever keys the config file sets.
    pub fn from_config(config: Option<&Config>) -> Self {
        let mut s = Settings::default();
        let Some(c) = config else {
            return s;
        };
        if let Some(v) = &c.start_url {
            s.start_url = v.clone();
        }
        if let Some(v) = &c.domain_prefix {
            s.domain_prefix = v.clone();
        }
        if let Some(v) = &c.start_at_chapter {
            s.resume_marker = v.clone();
        }
        if let Some(v) = &c.output_dir {
            s.output_dir = v.clone();
        }
        if let Some(v) = &c.container_class {
            s.container_class = v.clone();
        }
        if let Some(v) = &c.user_agent {
            s.user_agent = v.clone();
        }
        if c.timeout_secs.is_some() {
            s.timeout_secs = c.timeout_secs;
        }
        if let Some(v) = &c.converter {
            s.converter = v.clone();
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let c: Config = toml::from_str("").unwrap();
        assert!(c.start_url.is_none());
        assert!(c.domain_prefix.is_none());
        assert!(c.start_at_chapter.is_none());
        assert!(c.output_dir.is_none());
        assert!(c.container_class.is_none());
        assert!(c.user_agent.is_none());
        assert!(c.timeout_secs.is_none());
        assert!(c.converter.is_none());
    }

    #[test]
    fn parse_full_config() {
        let s = r#"
            start_url = "https://docs.example.com/en/index.html"
            domain_prefix = "https://docs.example.com/en/"
            start_at_chapter = "00042"
            output_dir = "out"
            container_class = "toc"
            user_agent = "Custom/1.0"
            timeout_secs = 60
            converter = "/usr/local/bin/wkhtmltopdf"
        "#;
        let c: Config = toml::from_str(s).unwrap();
        assert_eq!(
            c.start_url.as_deref(),
            Some("https://docs.example.com/en/index.html")
        );
        assert_eq!(c.domain_prefix.as_deref(), Some("https://docs.example.com/en/"));
        assert_eq!(c.start_at_chapter.as_deref(), Some("00042"));
        assert_eq!(c.output_dir.as_deref(), Some(std::path::Path::new("out")));
        assert_eq!(c.container_class.as_deref(), Some("toc"));
        assert_eq!(c.user_agent.as_deref(), Some("Custom/1.0"));
        assert_eq!(c.timeout_secs, Some(60));
        assert_eq!(
            c.converter.as_deref(),
            Some(std::path::Path::new("/usr/local/bin/wkhtmltopdf"))
        );
    }

    #[test]
    fn invalid_toml_errors() {
        assert!(toml::from_str::<Config>("output_dir = [").is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let c: Config = toml::from_str("retry_count = 3\nstart_at_chapter = \"x\"").unwrap();
        assert_eq!(c.start_at_chapter.as_deref(), Some("x"));
    }

    #[test]
    fn settings_default_matches_constants() {
        let s = Settings::default();
        assert_eq!(s.start_url, DEFAULT_START_URL);
        assert_eq!(s.domain_prefix, DEFAULT_DOMAIN_PREFIX);
        assert!(s.resume_marker.is_empty());
        assert_eq!(s.output_dir, PathBuf::from("./chapters"));
        assert_eq!(s.container_class, "toctree-wrapper");
        assert!(s.timeout_secs.is_none());
        assert_eq!(s.converter, PathBuf::from("wkhtmltopdf"));
    }

    #[test]
    fn settings_from_partial_config_keeps_other_defaults() {
        let c: Config = toml::from_str("start_at_chapter = \"00007\"\ntimeout_secs = 10").unwrap();
        let s = Settings::from_config(Some(&c));
        assert_eq!(s.resume_marker, "00007");
        assert_eq!(s.timeout_secs, Some(10));
        assert_eq!(s.start_url, DEFAULT_START_URL);
        assert_eq!(s.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn settings_from_no_config_is_default() {
        assert_eq!(Settings::from_config(None), Settings::default());
    }
}
