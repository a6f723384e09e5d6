//! List site content

use anyhow::Result;
use std::sync::Arc;

use crate::content::{ContentProvider, Page};
use crate::posts::Catalog;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let store = folio.content_store();
    let catalog = Catalog::new(&store, &folio.config.site);

    match content_type {
        "post" | "posts" => print_pages("Posts", &catalog.blog_posts()?),
        "project" | "projects" => print_pages("Projects", &catalog.projects()?),
        "all" => {
            let pages = store.pages()?;
            print_pages("Pages", &pages);
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, project, all",
                content_type
            );
        }
    }

    Ok(())
}

fn print_pages(heading: &str, pages: &[Arc<Page>]) {
    println!("{} ({}):", heading, pages.len());
    for page in pages {
        let date = page
            .date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let draft = if page.is_published() { "" } else { " (unpublished)" };
        println!("  {} - {} [{}]{}", date, page.title(), page.path, draft);
    }
}
