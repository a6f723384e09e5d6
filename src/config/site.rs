//! Site configuration (config.toml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SiteError};

/// Main site configuration, loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Display values injected into every rendered page
    pub configs: DisplayConfig,

    /// Content layout and server behavior
    #[serde(default)]
    pub site: ContentConfig,
}

/// The `[configs]` table. Every key is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub domain: String,
    pub email: String,
    pub your_name: String,
    pub github: String,
    pub blog_comments: String,
    pub hubspot: String,
    pub linkedin: String,
    pub twitter: String,
}

/// The optional `[site]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub content_dir: String,
    pub extension: String,
    pub auto_reload: bool,
    pub blog_dir: String,
    pub projects_dir: String,
    pub static_dir: String,
    pub svg_dir: String,
    pub freeze_dir: String,
    pub search_fallback_limit: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            extension: ".md".to_string(),
            auto_reload: true,
            blog_dir: "blogs".to_string(),
            projects_dir: "projects".to_string(),
            static_dir: "static".to_string(),
            svg_dir: "static/images".to_string(),
            freeze_dir: "build".to_string(),
            search_fallback_limit: 10,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SiteError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|message| SiteError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let config: SiteConfig = toml::from_str(content).map_err(|e| e.to_string())?;
        if config.site.extension.is_empty() {
            return Err("site.extension must not be empty".to_string());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[configs]
domain = "example.com"
email = "me@example.com"
your_name = "Ada"
github = "https://github.com/ada"
blog_comments = "true"
hubspot = "12345"
linkedin = "https://linkedin.com/in/ada"
twitter = "https://twitter.com/ada"
"#;

    #[test]
    fn test_parse_config_with_defaults() {
        let config = SiteConfig::parse(FULL).unwrap();
        assert_eq!(config.configs.your_name, "Ada");
        assert_eq!(config.site.content_dir, "content");
        assert_eq!(config.site.blog_dir, "blogs");
        assert_eq!(config.site.search_fallback_limit, 10);
        assert!(config.site.auto_reload);
    }

    #[test]
    fn test_parse_site_overrides() {
        let text = format!("{}\n[site]\nauto_reload = false\nfreeze_dir = \"out\"\n", FULL);
        let config = SiteConfig::parse(&text).unwrap();
        assert!(!config.site.auto_reload);
        assert_eq!(config.site.freeze_dir, "out");
        assert_eq!(config.site.extension, ".md");
    }

    #[test]
    fn test_missing_configs_key_is_error() {
        let text = FULL.replace("hubspot = \"12345\"\n", "");
        let err = SiteConfig::parse(&text).unwrap_err();
        assert!(err.contains("hubspot"), "unexpected error: {}", err);
    }

    #[test]
    fn test_missing_configs_table_is_error() {
        assert!(SiteConfig::parse("[site]\nblog_dir = \"posts\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SiteConfig::load("/nonexistent/config.toml").unwrap_err();
        assert!(matches!(err, SiteError::Config { .. }));
    }
}
