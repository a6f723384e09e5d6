//! Freeze the site to static HTML

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::views::Site;
use crate::Folio;

/// Summary of a freeze run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FreezeReport {
    pub pages: usize,
    pub static_files: usize,
}

/// Render every route of the site into `folio.freeze_dir`
pub fn run(folio: &Folio) -> Result<FreezeReport> {
    let site = folio.site()?;
    freeze(&site, &folio.freeze_dir)
}

/// Render every route of `site` into `out_dir`
pub fn freeze(site: &Site, out_dir: &Path) -> Result<FreezeReport> {
    let start = std::time::Instant::now();
    let mut report = FreezeReport::default();
    fs::create_dir_all(out_dir)?;

    write_page(out_dir, "index.html", &site.home()?, &mut report)?;
    write_page(out_dir, "about/index.html", &site.about()?, &mut report)?;
    write_page(out_dir, "blog/index.html", &site.blog()?, &mut report)?;
    write_page(out_dir, "projects/index.html", &site.projects()?, &mut report)?;
    write_page(out_dir, "404.html", &site.not_found()?, &mut report)?;

    let catalog = site.catalog();
    for post in catalog.blog_posts()? {
        let name = post.url_name(site.blog_dir());
        let html = site.post(name)?;
        write_page(out_dir, &format!("post/{}/index.html", name), &html, &mut report)?;
    }
    for project in catalog.projects()? {
        let name = project.url_name(site.projects_dir());
        let html = site.project(name)?;
        write_page(out_dir, &format!("projects/{}/index.html", name), &html, &mut report)?;
    }

    let static_dir = &site.folio().static_dir;
    if static_dir.exists() {
        report.static_files = copy_dir(static_dir, &out_dir.join("static"))?;
    }

    tracing::info!(
        "Froze {} pages and {} static files into {:?} in {:.2}s",
        report.pages,
        report.static_files,
        out_dir,
        start.elapsed().as_secs_f64()
    );
    Ok(report)
}

fn write_page(out_dir: &Path, relative: &str, html: &str, report: &mut FreezeReport) -> Result<()> {
    let output_path = out_dir.join(relative);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(&output_path, html).with_context(|| format!("Failed to write {:?}", output_path))?;
    tracing::debug!("Generated: {:?}", output_path);
    report.pages += 1;
    Ok(())
}

/// Copy a directory tree, returning the number of files copied
fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(from).follow_links(true) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(from)?;
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {:?}", entry.path()))?;
            copied += 1;
        }
    }
    Ok(copied)
}
