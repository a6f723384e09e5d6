//! Catalog - the blog and projects views over a content provider

use std::sync::Arc;

use super::{only_published, search_bodies, select_section, sort_by_date_desc};
use crate::config::ContentConfig;
use crate::content::{ContentProvider, Page};
use crate::error::{Result, SiteError};

/// Outcome of a blog search
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// The query as given, `None` when it was blank
    pub query: Option<String>,
    pub posts: Vec<Arc<Page>>,
}

/// Blog and project listings over a [`ContentProvider`]
pub struct Catalog<'a> {
    provider: &'a dyn ContentProvider,
    blog_dir: &'a str,
    projects_dir: &'a str,
    fallback_limit: usize,
}

impl<'a> Catalog<'a> {
    pub fn new(provider: &'a dyn ContentProvider, config: &'a ContentConfig) -> Self {
        Self {
            provider,
            blog_dir: &config.blog_dir,
            projects_dir: &config.projects_dir,
            fallback_limit: config.search_fallback_limit,
        }
    }

    /// Published blog posts in enumeration order
    fn published_posts(&self) -> Result<Vec<Arc<Page>>> {
        let pages = self.provider.pages()?;
        Ok(only_published(select_section(&pages, self.blog_dir)))
    }

    /// Published blog posts, newest first
    pub fn blog_posts(&self) -> Result<Vec<Arc<Page>>> {
        let mut posts = self.published_posts()?;
        sort_by_date_desc(&mut posts);
        Ok(posts)
    }

    /// The `limit` most recent published posts
    pub fn latest_posts(&self, limit: usize) -> Result<Vec<Arc<Page>>> {
        let mut posts = self.blog_posts()?;
        posts.truncate(limit);
        Ok(posts)
    }

    /// All project pages, newest first. Unpublished projects are listed too.
    pub fn projects(&self) -> Result<Vec<Arc<Page>>> {
        let pages = self.provider.pages()?;
        let mut projects = select_section(&pages, self.projects_dir);
        sort_by_date_desc(&mut projects);
        Ok(projects)
    }

    /// Search published post bodies.
    ///
    /// A blank or whitespace-only query returns the latest posts instead.
    /// Otherwise the query is matched exactly as given, surrounding spaces
    /// included. Matches are returned in enumeration order, not by date.
    pub fn search(&self, query: Option<&str>) -> Result<SearchResults> {
        let query = query.filter(|q| !q.trim().is_empty());
        let posts = match query {
            None => self.latest_posts(self.fallback_limit)?,
            Some(q) => search_bodies(&self.published_posts()?, q),
        };
        tracing::debug!("Search {:?} matched {} posts", query, posts.len());
        Ok(SearchResults {
            query: query.map(str::to_string),
            posts,
        })
    }

    /// A single blog post by name, published or not
    pub fn post(&self, name: &str) -> Result<Arc<Page>> {
        self.lookup(self.blog_dir, name)
    }

    /// A single project by name
    pub fn project(&self, name: &str) -> Result<Arc<Page>> {
        self.lookup(self.projects_dir, name)
    }

    fn lookup(&self, section: &str, name: &str) -> Result<Arc<Page>> {
        let path = format!("{}/{}", section.trim_end_matches('/'), name);
        self.provider
            .get(&path)?
            .ok_or(SiteError::NotFound(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Metadata, StaticPages};
    use chrono::NaiveDate;

    fn page(path: &str, date: &str, published: Option<bool>, body: &str) -> Page {
        let meta = Metadata {
            date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()),
            published,
            ..Default::default()
        };
        Page::new(path, meta, body)
    }

    fn names(pages: &[Arc<Page>]) -> Vec<&str> {
        pages.iter().map(|p| p.name()).collect()
    }

    fn example_store() -> StaticPages {
        StaticPages::new(vec![
            page("blogs/a", "2023-01-01", Some(true), "Hello from a"),
            page("blogs/b", "2023-06-01", Some(true), "nothing to see"),
            page("blogs/c", "2023-06-01", Some(false), "hello from c"),
            page("projects/p1", "2021-01-01", None, ""),
            page("projects/p2", "2022-01-01", Some(false), ""),
        ])
    }

    #[test]
    fn test_blog_listing_example() {
        let store = example_store();
        let config = ContentConfig::default();
        let catalog = Catalog::new(&store, &config);
        assert_eq!(names(&catalog.blog_posts().unwrap()), vec!["b", "a"]);
    }

    #[test]
    fn test_projects_ignore_published() {
        let store = example_store();
        let config = ContentConfig::default();
        let catalog = Catalog::new(&store, &config);
        assert_eq!(names(&catalog.projects().unwrap()), vec!["p2", "p1"]);
    }

    #[test]
    fn test_search_matches_published_bodies() {
        let store = example_store();
        let config = ContentConfig::default();
        let catalog = Catalog::new(&store, &config);

        let results = catalog.search(Some("HELLO")).unwrap();
        assert_eq!(results.query.as_deref(), Some("HELLO"));
        assert_eq!(names(&results.posts), vec!["a"]);

        let results = catalog.search(Some("goodbye")).unwrap();
        assert!(results.posts.is_empty());
    }

    #[test]
    fn test_search_does_not_trim_query() {
        let store = StaticPages::new(vec![
            page("blogs/joined", "2023-01-01", Some(true), "helloworld"),
            page("blogs/spaced", "2023-02-01", Some(true), "say hello there"),
        ]);
        let config = ContentConfig::default();
        let catalog = Catalog::new(&store, &config);

        let results = catalog.search(Some("hello ")).unwrap();
        assert_eq!(results.query.as_deref(), Some("hello "));
        assert_eq!(names(&results.posts), vec!["spaced"]);

        let results = catalog.search(Some(" hello")).unwrap();
        assert_eq!(names(&results.posts), vec!["spaced"]);
    }

    #[test]
    fn test_search_keeps_enumeration_order() {
        let store = StaticPages::new(vec![
            page("blogs/older", "2020-01-01", Some(true), "rust"),
            page("blogs/newer", "2024-01-01", Some(true), "Rust"),
        ]);
        let config = ContentConfig::default();
        let catalog = Catalog::new(&store, &config);
        let results = catalog.search(Some("rust")).unwrap();
        assert_eq!(names(&results.posts), vec!["older", "newer"]);
    }

    #[test]
    fn test_blank_search_falls_back_to_latest() {
        let mut pages = Vec::new();
        for day in 1..=12 {
            pages.push(page(
                &format!("blogs/post-{:02}", day),
                &format!("2024-01-{:02}", day),
                Some(true),
                "body",
            ));
        }
        pages.push(page("blogs/hidden", "2024-02-01", None, "body"));
        let store = StaticPages::new(pages);
        let config = ContentConfig::default();
        let catalog = Catalog::new(&store, &config);

        for query in [None, Some(""), Some("   ")] {
            let results = catalog.search(query).unwrap();
            assert_eq!(results.query, None);
            assert_eq!(results.posts.len(), 10);
            assert_eq!(results.posts[0].name(), "post-12");
            assert_eq!(results.posts[9].name(), "post-03");
        }
    }

    #[test]
    fn test_blank_search_with_few_posts() {
        let store = example_store();
        let config = ContentConfig::default();
        let catalog = Catalog::new(&store, &config);
        let results = catalog.search(None).unwrap();
        assert_eq!(names(&results.posts), vec!["b", "a"]);
    }

    #[test]
    fn test_lookup() {
        let store = example_store();
        let config = ContentConfig::default();
        let catalog = Catalog::new(&store, &config);

        assert_eq!(catalog.post("a").unwrap().path, "blogs/a");
        // Direct links still reach unpublished posts
        assert_eq!(catalog.post("c").unwrap().path, "blogs/c");
        assert_eq!(catalog.project("p1").unwrap().path, "projects/p1");

        let err = catalog.post("missing").unwrap_err();
        assert!(err.is_not_found());
        assert!(catalog.project("a").unwrap_err().is_not_found());
    }
}
