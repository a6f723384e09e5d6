//! A small site on disk shared by the integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const CONFIG: &str = r#"
[configs]
domain = "example.com"
email = "me@example.com"
your_name = "Ada Lovelace"
github = "https://github.com/ada"
blog_comments = "true"
hubspot = ""
linkedin = "https://linkedin.com/in/ada"
twitter = "https://twitter.com/ada"

[site]
auto_reload = true
"#;

pub const BADGE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><text>{test}</text></svg>"#;

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Three blog posts (one unpublished), two projects, a stylesheet and an SVG badge
pub fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "config.toml", CONFIG);
    write(
        root,
        "content/blogs/a.md",
        "title: Alpha Post\ndate: 2023-01-01\npublished: true\n\nWe say Hello to the world.\n",
    );
    write(
        root,
        "content/blogs/b.md",
        "---\ntitle: Bravo Post\ndate: 2023-06-01\npublished: true\n---\n\n# Bravo\n\nNothing special.\n",
    );
    write(
        root,
        "content/blogs/c.md",
        "title: Charlie Draft\ndate: 2023-06-01\npublished: false\n\nhello again\n",
    );
    write(
        root,
        "content/projects/engine.md",
        "title: Engine Project\ndate: 2022-05-01\n\nAn engine.\n",
    );
    write(
        root,
        "content/projects/loom.md",
        "title: Loom Project\ndate: 2021-05-01\npublished: false\n\nA loom.\n",
    );
    write(root, "static/css/main.css", "body { margin: 0; }\n");
    write(root, "static/images/badge.svg", BADGE);
    dir
}
