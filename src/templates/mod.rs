//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Every render gets the site-wide
//! display values from `[configs]` plus `current_year`.

use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tera::{Context, Tera};

use crate::config::DisplayConfig;
use crate::content::Page;
use crate::error::Result;

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
    globals: Context,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(display: &DisplayConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("site/base.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("blog-post.html", include_str!("site/blog-post.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("projects-post.html", include_str!("site/projects-post.html")),
            ("404.html", include_str!("site/404.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self {
            tera,
            globals: global_context(display),
        })
    }

    /// Render a template with the global variables plus `context`
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        let mut full = self.globals.clone();
        full.extend(context.clone());
        Ok(self.tera.render(template_name, &full)?)
    }
}

/// Variables available in every template
fn global_context(display: &DisplayConfig) -> Context {
    let mut context = Context::new();
    context.insert("domain", &display.domain);
    context.insert("email", &display.email);
    context.insert("your_name", &display.your_name);
    context.insert("github", &display.github);
    context.insert("blog_comments", &display.blog_comments);
    context.insert("hubspot", &display.hubspot);
    context.insert("linkedin", &display.linkedin);
    context.insert("twitter", &display.twitter);
    context.insert("current_year", &chrono::Local::now().year());
    context
}

/// Tera filter: format a `YYYY-MM-DD` date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    if format == "LL" {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(tera::Value::String(date.format("%B %d, %Y").to_string()));
        }
    }

    Ok(tera::Value::String(s))
}

/// A page as seen by templates. `name` is the URL name below its section.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub path: String,
    pub name: String,
    pub title: String,
    pub date: String,
    pub summary: String,
    pub published: bool,
    pub html: String,
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PageView {
    pub fn new(page: &Page, section: &str) -> Self {
        Self {
            path: page.path.clone(),
            name: page.url_name(section).to_string(),
            title: page.title().to_string(),
            date: page
                .date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            summary: page.meta.summary.clone().unwrap_or_default(),
            published: page.is_published(),
            html: page.html.clone(),
            extra: page.meta.extra.clone(),
        }
    }
}
