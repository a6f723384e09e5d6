//! SVG text overlay
//!
//! Serves an SVG template with its `{test}` placeholder replaced by caller
//! supplied text. Template names are restricted to a plain identifier and the
//! text is escaped before it is written into the markup.

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, SiteError};

/// Token replaced in the template
pub const PLACEHOLDER: &str = "{test}";

pub const CONTENT_TYPE: &str = "image/svg+xml";

lazy_static! {
    static ref SVG_NAME: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// Directory of SVG templates
#[derive(Debug, Clone)]
pub struct SvgOverlay {
    dir: PathBuf,
}

impl SvgOverlay {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Resolve a requested name (with or without `.svg`) to a template file
    pub fn template_path(&self, name: &str) -> Result<PathBuf> {
        let stem = name.strip_suffix(".svg").unwrap_or(name);
        if !SVG_NAME.is_match(stem) {
            return Err(SiteError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{}.svg", stem)))
    }

    /// Render `name` with `text` in place of the placeholder
    pub fn render(&self, name: &str, text: &str) -> Result<String> {
        let path = self.template_path(name)?;
        let template = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SiteError::NotFound(path.display().to_string()),
            _ => SiteError::Io(e),
        })?;
        Ok(substitute(&template, text))
    }
}

/// Replace every placeholder with the XML-escaped text
pub fn substitute(template: &str, text: &str) -> String {
    template.replace(PLACEHOLDER, &html_escape::encode_safe(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BADGE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><text>{test}</text></svg>"#;

    #[test]
    fn test_substitute_escapes_text() {
        assert_eq!(
            substitute(BADGE, "Hi <there> & \"you\""),
            r#"<svg xmlns="http://www.w3.org/2000/svg"><text>Hi &lt;there&gt; &amp; &quot;you&quot;</text></svg>"#
        );
        assert_eq!(substitute("{test}-{test}", "a"), "a-a");
        assert!(!substitute(BADGE, "it's").contains('\''));
    }

    #[test]
    fn test_render_from_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("badge.svg"), BADGE).unwrap();
        let overlay = SvgOverlay::new(dir.path());

        let svg = overlay.render("badge", "Rust").unwrap();
        assert!(svg.contains("<text>Rust</text>"));

        let svg = overlay.render("badge.svg", "").unwrap();
        assert!(svg.contains("<text></text>"));
    }

    #[test]
    fn test_missing_template_is_not_found() {
        let dir = TempDir::new().unwrap();
        let overlay = SvgOverlay::new(dir.path());
        assert!(overlay.render("nope", "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_rejects_unsafe_names() {
        let overlay = SvgOverlay::new("/tmp");
        for name in ["../secret", "a/b", "", ".svg", "a b", "..", "%2e%2e"] {
            assert!(
                matches!(overlay.template_path(name), Err(SiteError::InvalidName(_))),
                "accepted {:?}",
                name
            );
        }
    }
}
