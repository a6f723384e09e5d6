//! Page views - one method per route, returning rendered HTML
//!
//! Shared by the HTTP server and the static export.

use std::sync::Arc;
use tera::Context;

use crate::content::{ContentProvider, Page};
use crate::error::Result;
use crate::posts::Catalog;
use crate::svg::SvgOverlay;
use crate::templates::{PageView, TemplateRenderer};
use crate::Folio;

/// Everything needed to answer a request
pub struct Site {
    folio: Folio,
    provider: Arc<dyn ContentProvider>,
    renderer: TemplateRenderer,
    svg: SvgOverlay,
}

impl Site {
    pub fn new(folio: &Folio, provider: Arc<dyn ContentProvider>) -> Result<Self> {
        let renderer = TemplateRenderer::new(&folio.config.configs)?;
        Ok(Self {
            folio: folio.clone(),
            provider,
            renderer,
            svg: SvgOverlay::new(&folio.svg_dir),
        })
    }

    pub fn folio(&self) -> &Folio {
        &self.folio
    }

    pub fn provider(&self) -> &dyn ContentProvider {
        self.provider.as_ref()
    }

    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(self.provider.as_ref(), &self.folio.config.site)
    }

    /// Section holding blog posts (`blogs`)
    pub fn blog_dir(&self) -> &str {
        &self.folio.config.site.blog_dir
    }

    /// Section holding projects (`projects`)
    pub fn projects_dir(&self) -> &str {
        &self.folio.config.site.projects_dir
    }

    pub fn home(&self) -> Result<String> {
        self.renderer.render("home.html", &Context::new())
    }

    pub fn about(&self) -> Result<String> {
        self.renderer.render("about.html", &Context::new())
    }

    /// Published posts, newest first
    pub fn blog(&self) -> Result<String> {
        let posts = self.catalog().blog_posts()?;
        self.render_blog(&posts, None)
    }

    /// Search results, or the latest posts when the query is blank
    pub fn search(&self, query: Option<&str>) -> Result<String> {
        let results = self.catalog().search(query)?;
        self.render_blog(&results.posts, results.query.as_deref())
    }

    fn render_blog(&self, posts: &[Arc<Page>], query: Option<&str>) -> Result<String> {
        let mut context = Context::new();
        context.insert("posts", &views(posts, self.blog_dir()));
        context.insert("query", query.unwrap_or(""));
        self.renderer.render("blog.html", &context)
    }

    pub fn post(&self, name: &str) -> Result<String> {
        let post = self.catalog().post(name)?;
        let mut context = Context::new();
        context.insert("post", &PageView::new(&post, self.blog_dir()));
        self.renderer.render("blog-post.html", &context)
    }

    /// All projects, newest first
    pub fn projects(&self) -> Result<String> {
        let projects = self.catalog().projects()?;
        let mut context = Context::new();
        context.insert("projects", &views(&projects, self.projects_dir()));
        self.renderer.render("projects.html", &context)
    }

    pub fn project(&self, name: &str) -> Result<String> {
        let project = self.catalog().project(name)?;
        let mut context = Context::new();
        context.insert("project", &PageView::new(&project, self.projects_dir()));
        self.renderer.render("projects-post.html", &context)
    }

    pub fn not_found(&self) -> Result<String> {
        self.renderer.render("404.html", &Context::new())
    }

    /// SVG template with `text` in place of its placeholder
    pub fn svg(&self, name: &str, text: &str) -> Result<String> {
        self.svg.render(name, text)
    }
}

fn views(pages: &[Arc<Page>], section: &str) -> Vec<PageView> {
    pages.iter().map(|p| PageView::new(p, section)).collect()
}
