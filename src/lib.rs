//! folio-rs: a personal website and blog served from Markdown files
//!
//! Pages live in a content directory as Markdown with front-matter. Blog
//! posts and projects are selected by path section, ordered by date and
//! searched by body text, then rendered with embedded Tera templates. The
//! same views back a live server and a static export.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod posts;
pub mod server;
pub mod svg;
pub mod templates;
pub mod views;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use error::{Result, SiteError};

/// Name of the configuration file in the site directory
pub const CONFIG_FILE: &str = "config.toml";

/// A site directory and its configuration
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration, loaded once
    pub config: Arc<config::SiteConfig>,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown content directory
    pub content_dir: PathBuf,
    /// Static assets directory
    pub static_dir: PathBuf,
    /// SVG overlay templates directory
    pub svg_dir: PathBuf,
    /// Static export output directory
    pub freeze_dir: PathBuf,
}

impl Folio {
    /// Open a site directory. A missing or incomplete `config.toml` is an error.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::load(base_dir.join(CONFIG_FILE))?;
        Ok(Self::with_config(base_dir, config))
    }

    /// Build from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let site = &config.site;
        let content_dir = base_dir.join(&site.content_dir);
        let static_dir = base_dir.join(&site.static_dir);
        let svg_dir = base_dir.join(&site.svg_dir);
        let freeze_dir = base_dir.join(&site.freeze_dir);

        Self {
            config: Arc::new(config),
            base_dir,
            content_dir,
            static_dir,
            svg_dir,
            freeze_dir,
        }
    }

    /// The file-backed content store for this site
    pub fn content_store(&self) -> content::FlatPages {
        content::FlatPages::from_config(&self.base_dir, &self.config.site)
    }

    /// Views over this site's content directory
    pub fn site(&self) -> Result<views::Site> {
        views::Site::new(self, Arc::new(self.content_store()))
    }
}
