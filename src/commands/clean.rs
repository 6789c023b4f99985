//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Remove the generated site
pub fn run(blog: &Blog) -> Result<()> {
    if blog.public_dir.exists() {
        fs::remove_dir_all(&blog.public_dir)?;
        tracing::info!("Deleted: {:?}", blog.public_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", blog.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_dir() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::from_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(blog.public_dir.join("a")).unwrap();
        fs::write(blog.public_dir.join("a/index.html"), "<p>a</p>").unwrap();

        run(&blog).unwrap();
        assert!(!blog.public_dir.exists());

        // A second run has nothing to do
        run(&blog).unwrap();
    }
}
