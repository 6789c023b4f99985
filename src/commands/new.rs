//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create `<content>/<slug>/index.md` with title and date front-matter
///
/// The slug defaults to the slugified title.
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = match slug {
        Some(slug) => slug::slugify(slug),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from {:?}", title);
    }

    let target_dir = blog.content_dir.join(&slug);
    let file_path = target_dir.join("index.md");
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::create_dir_all(&target_dir)?;

    let content = format!(
        "---\ntitle: {}\ndate: {}\n---\n",
        serde_yaml::to_string(title)?.trim_end(),
        now.format("%Y-%m-%d %H:%M:%S %z")
    );
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
