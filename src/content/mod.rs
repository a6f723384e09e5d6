//! Content module - pages, front-matter, Markdown and content providers

mod frontmatter;
mod markdown;
mod page;
pub mod store;

pub use frontmatter::{parse_date_string, Metadata};
pub use markdown::MarkdownRenderer;
pub use page::Page;
pub use store::{ContentProvider, FlatPages, StaticPages};
