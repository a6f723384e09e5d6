//! Error types shared by the content, catalog and server layers

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Configuration error in {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SiteError::NotFound(_))
    }
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;
