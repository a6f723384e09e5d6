//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Metadata block of a content file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,

    /// Unparseable dates become `None` instead of failing the whole block
    #[serde(deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,

    /// Only a YAML boolean counts; `"true"` or `1` yield `None`
    #[serde(deserialize_with = "strict_bool")]
    pub published: Option<bool>,

    #[serde(deserialize_with = "lenient_string")]
    pub summary: Option<String>,

    /// Presentation-only keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => parse_date_string(&s),
        _ => None,
    })
}

fn strict_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::Bool(b)) => Some(b),
        _ => None,
    })
}

impl Metadata {
    /// Split a content file into its metadata and body.
    ///
    /// Accepts a `---` fenced YAML block, or bare `key: value` lines at the
    /// top of the file ended by the first blank line. Anything else is all
    /// body. A header that is not valid YAML is logged and ignored.
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.trim_start_matches('\u{feff}');

        let (header, body) = if let Some(split) = split_fenced(content) {
            split
        } else if let Some(split) = split_flat(content) {
            split
        } else {
            return (Metadata::default(), content);
        };

        if header.trim().is_empty() {
            return (Metadata::default(), body);
        }

        match serde_yaml::from_str::<Metadata>(header) {
            Ok(meta) => (meta, body),
            Err(e) => {
                tracing::warn!("Failed to parse front-matter, ignoring it: {}", e);
                (Metadata::default(), body)
            }
        }
    }
}

/// `---\n<yaml>\n---\n<body>`
fn split_fenced(content: &str) -> Option<(&str, &str)> {
    let first_line_end = content.find('\n')?;
    if content[..first_line_end].trim_end() != "---" {
        return None;
    }
    let rest = &content[first_line_end + 1..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let header = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((header, body));
        }
        offset += line.len();
    }

    // No closing fence
    None
}

/// `key: value` lines up to the first blank line, then the body
fn split_flat(content: &str) -> Option<(&str, &str)> {
    let first = content.lines().next()?;
    if !is_key_line(first) {
        return None;
    }

    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim().is_empty() {
            let header = &content[..offset];
            let body = content[offset..].trim_start_matches(['\n', '\r']);
            return Some((header, body));
        }
        offset += line.len();
    }

    // Header only, no body
    Some((content, ""))
}

/// Looks like `key: value` or `key:`, with a plain identifier key
fn is_key_line(line: &str) -> bool {
    let Some(colon_pos) = line.find(':') else {
        return false;
    };
    let key = &line[..colon_pos];
    let after = &line[colon_pos + 1..];

    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp")
        && (after.is_empty() || after.starts_with(' ') || after.starts_with('\t'))
}

/// Parse a date string in various formats, keeping the calendar date
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_fenced_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
published: true
tags: [rust]
---

This is the content.
"#;

        let (meta, body) = Metadata::parse(content);
        assert_eq!(meta.title.as_deref(), Some("Hello World"));
        assert_eq!(meta.date, Some(ymd(2024, 1, 15)));
        assert_eq!(meta.published, Some(true));
        assert!(meta.extra.contains_key("tags"));
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_parse_flat_frontmatter() {
        let content = "title: Flat\ndate: 2023-06-01\npublished: false\n\n# Heading\n\nBody text.\n";

        let (meta, body) = Metadata::parse(content);
        assert_eq!(meta.title.as_deref(), Some("Flat"));
        assert_eq!(meta.date, Some(ymd(2023, 6, 1)));
        assert_eq!(meta.published, Some(false));
        assert!(body.starts_with("# Heading"));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo header here.";
        let (meta, body) = Metadata::parse(content);
        assert_eq!(meta, Metadata::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_published_must_be_boolean() {
        let (meta, _) = Metadata::parse("published: \"true\"\n\nbody");
        assert_eq!(meta.published, None);

        let (meta, _) = Metadata::parse("published: yes\n\nbody");
        assert_eq!(meta.published, None);

        let (meta, _) = Metadata::parse("published: 1\n\nbody");
        assert_eq!(meta.published, None);
    }

    #[test]
    fn test_invalid_date_keeps_other_fields() {
        let (meta, body) = Metadata::parse("title: Odd\ndate: someday\npublished: true\n\nbody");
        assert_eq!(meta.title.as_deref(), Some("Odd"));
        assert_eq!(meta.date, None);
        assert_eq!(meta.published, Some(true));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_broken_yaml_is_ignored() {
        let content = "---\ntitle: [unclosed\n---\nStill here.";
        let (meta, body) = Metadata::parse(content);
        assert_eq!(meta, Metadata::default());
        assert_eq!(body, "Still here.");
    }

    #[test]
    fn test_url_first_line_is_not_header() {
        let content = "https://example.com is a link\n\nmore";
        let (meta, body) = Metadata::parse(content);
        assert_eq!(meta, Metadata::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date_string("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date_string("2024/01/15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date_string("2024-01-15 10:30:00"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date_string("2024-01-15T10:30:00"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date_string("2024-01-15T10:30:00+02:00"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date_string("15 Jan 2024"), None);
    }
}
