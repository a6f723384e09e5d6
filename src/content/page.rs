//! Page model

use chrono::NaiveDate;

use super::{MarkdownRenderer, Metadata};

/// A content file: blog post, project or any other page
#[derive(Debug, Clone)]
pub struct Page {
    /// Path relative to the content root, without extension (`blogs/my-post`)
    pub path: String,

    /// Parsed front-matter
    pub meta: Metadata,

    /// Markdown source after the front-matter
    pub body: String,

    /// Rendered HTML of `body`
    pub html: String,
}

impl Page {
    /// Create a page without rendering its body
    pub fn new(path: impl Into<String>, meta: Metadata, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            meta,
            body: body.into(),
            html: String::new(),
        }
    }

    /// Parse a content file and render its body
    pub fn parse(path: impl Into<String>, source: &str, renderer: &MarkdownRenderer) -> Self {
        let (meta, body) = Metadata::parse(source);
        let html = renderer.render(body);
        Self {
            path: path.into(),
            meta,
            body: body.to_string(),
            html,
        }
    }

    /// Last path segment, as used in URLs
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.meta.date
    }

    /// Title from metadata, else the page name
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or_else(|| self.name())
    }

    /// Only an explicit boolean `true` publishes a page
    pub fn is_published(&self) -> bool {
        self.meta.published == Some(true)
    }

    /// Path below `section`, if the page lives inside it (`blogs/2024/x` -> `2024/x`)
    pub fn relative_to(&self, section: &str) -> Option<&str> {
        let section = section.trim_end_matches('/');
        self.path
            .strip_prefix(section)?
            .strip_prefix('/')
            .filter(|rest| !rest.is_empty())
    }

    /// Whether the page lives inside `section`, at any depth
    pub fn in_section(&self, section: &str) -> bool {
        self.relative_to(section).is_some()
    }

    /// Name used in URLs under `section`: the path below it, or the full path
    pub fn url_name(&self, section: &str) -> &str {
        self.relative_to(section).unwrap_or(&self.path)
    }
}
