//! Content providers - where pages come from
//!
//! [`FlatPages`] reads a directory of Markdown files and caches parsed pages,
//! re-reading changed files on access when auto-reload is on. [`StaticPages`]
//! holds a fixed set of pages in memory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use walkdir::WalkDir;

use super::{MarkdownRenderer, Page};
use crate::config::ContentConfig;
use crate::error::Result;

/// Source of the full page collection
pub trait ContentProvider: Send + Sync {
    /// All pages, in a stable enumeration order
    fn pages(&self) -> Result<Vec<Arc<Page>>>;

    /// A single page by path (`blogs/my-post`)
    fn get(&self, path: &str) -> Result<Option<Arc<Page>>> {
        Ok(self.pages()?.into_iter().find(|p| p.path == path))
    }

    /// Drop any cached state so the next access reads from storage
    fn reload(&self) {}
}

/// In-memory provider over a fixed list of pages
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pages: Vec<Arc<Page>>,
}

impl StaticPages {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages: pages.into_iter().map(Arc::new).collect(),
        }
    }
}

impl ContentProvider for StaticPages {
    fn pages(&self) -> Result<Vec<Arc<Page>>> {
        Ok(self.pages.clone())
    }
}

struct CachedPage {
    mtime: Option<SystemTime>,
    page: Arc<Page>,
}

/// Pages in walk order plus path and file indexes
#[derive(Default)]
struct PageIndex {
    entries: Vec<(PathBuf, CachedPage)>,
    by_path: HashMap<String, usize>,
    by_file: HashMap<PathBuf, usize>,
}

impl PageIndex {
    fn pages(&self) -> Vec<Arc<Page>> {
        self.entries.iter().map(|(_, c)| c.page.clone()).collect()
    }

    fn get(&self, path: &str) -> Option<Arc<Page>> {
        self.by_path
            .get(path)
            .map(|&i| self.entries[i].1.page.clone())
    }

    /// The page parsed from `file`, if its mtime is unchanged
    fn cached(&self, file: &Path, mtime: Option<SystemTime>) -> Option<Arc<Page>> {
        let (_, cached) = &self.entries[*self.by_file.get(file)?];
        (cached.mtime.is_some() && cached.mtime == mtime).then(|| cached.page.clone())
    }
}

/// File-backed page collection rooted at a content directory
pub struct FlatPages {
    root: PathBuf,
    extension: String,
    auto_reload: bool,
    renderer: MarkdownRenderer,
    cache: RwLock<Option<PageIndex>>,
}

impl FlatPages {
    pub fn new<P: AsRef<Path>>(root: P, extension: &str, auto_reload: bool) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: extension.to_string(),
            auto_reload,
            renderer: MarkdownRenderer::new(),
            cache: RwLock::new(None),
        }
    }

    /// Build from the `[site]` config, resolving the content dir against `base_dir`
    pub fn from_config(base_dir: &Path, config: &ContentConfig) -> Self {
        Self::new(
            base_dir.join(&config.content_dir),
            &config.extension,
            config.auto_reload,
        )
    }

    fn with_index<T>(&self, f: impl FnOnce(&PageIndex) -> T) -> Result<T> {
        if !self.auto_reload {
            let guard = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(index) = guard.as_ref() {
                return Ok(f(index));
            }
        }

        let mut guard = self.cache.write().unwrap_or_else(|e| e.into_inner());
        // Another request may have loaded it while we waited
        if !self.auto_reload {
            if let Some(index) = guard.as_ref() {
                return Ok(f(index));
            }
        }

        let index = self.scan(guard.as_ref())?;
        let result = f(&index);
        *guard = Some(index);
        Ok(result)
    }

    /// Walk the content root, reusing unchanged pages from `previous`
    fn scan(&self, previous: Option<&PageIndex>) -> Result<PageIndex> {
        let mut index = PageIndex::default();
        if !self.root.exists() {
            tracing::debug!("Content directory {:?} does not exist", self.root);
            return Ok(index);
        }

        let mut loaded = 0;
        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let file = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(page_path) = self.page_path(file) else {
                continue;
            };

            let mtime = entry.metadata().ok().and_then(|m| m.modified().ok());
            let page = match previous.and_then(|prev| prev.cached(file, mtime)) {
                Some(page) => page,
                None => match fs::read_to_string(file) {
                    Ok(source) => {
                        loaded += 1;
                        Arc::new(Page::parse(page_path.clone(), &source, &self.renderer))
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load page {:?}: {}", file, e);
                        continue;
                    }
                },
            };

            index.by_path.insert(page_path, index.entries.len());
            index.by_file.insert(file.to_path_buf(), index.entries.len());
            index
                .entries
                .push((file.to_path_buf(), CachedPage { mtime, page }));
        }

        if loaded > 0 {
            tracing::debug!(
                "Loaded {} of {} pages from {:?}",
                loaded,
                index.entries.len(),
                self.root
            );
        }
        Ok(index)
    }

    /// `<root>/blogs/post.md` -> `blogs/post`
    fn page_path(&self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(&self.root).ok()?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        relative
            .strip_suffix(self.extension.as_str())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }
}

impl ContentProvider for FlatPages {
    fn pages(&self) -> Result<Vec<Arc<Page>>> {
        self.with_index(PageIndex::pages)
    }

    fn get(&self, path: &str) -> Result<Option<Arc<Page>>> {
        self.with_index(|index| index.get(path))
    }

    fn reload(&self) {
        let mut guard = self.cache.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}
