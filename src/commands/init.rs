//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# brewlog configuration

site:
  title: My Blog
  author: John Doe
  description: ''
  # Canonical URL, including the path prefix
  url: http://example.com
  social:
    email: ''
    twitter: ''
    github: ''
  # Relative to the assets directory
  icon: coffee.svg

language: en
# timezone: Europe/London
keywords: [blog]
path_prefix: ''

# Directories
content_dir: content/blog
assets_dir: content/assets
public_dir: public
exclude: []

# Writing
date_format: MMMM DD, YYYY
render_drafts: false
strict: false
excerpt:
  list: 180
  description: 240

markdown:
  highlight_theme: InspiredGitHub
  line_numbers: true
  image_max_width: 720

# Comments: none, disqus (shortname) or remarkbox (owner_key)
comments:
  provider: none

analytics: {}

feed:
  enable: true
  path: rss.xml
  limit: 20

manifest:
  enable: true
  background_color: '#ffffff'
  theme_color: '#663399'
  display: minimal-ui
"#;

const SAMPLE_ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><path fill="#663399" d="M8 20h40v18a16 16 0 0 1-16 16h-8A16 16 0 0 1 8 38z"/><path fill="none" stroke="#663399" stroke-width="4" d="M48 26h4a6 6 0 0 1 0 12h-4"/></svg>
"##;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }

    let defaults = SiteConfig::default();
    let content_dir = target_dir.join(&defaults.content_dir);
    let assets_dir = target_dir.join(&defaults.assets_dir);

    fs::create_dir_all(content_dir.join("hello-world"))?;
    fs::create_dir_all(&assets_dir)?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;
    fs::write(assets_dir.join("coffee.svg"), SAMPLE_ICON)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
summary: Your first post.
---

Welcome to your new blog! Every Markdown file under `{}` becomes a post.

## Writing

```bash
$ brewlog new "My New Post"
```

## Previewing

```bash
$ brewlog server
```

## Publishing

```bash
$ brewlog generate
```

The generated site lands in `{}`.
"#,
        now.format("%Y-%m-%d %H:%M:%S"),
        defaults.content_dir,
        defaults.public_dir
    );

    fs::write(content_dir.join("hello-world/index.md"), sample_post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blog;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_a_buildable_blog() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.site.icon.as_deref(), Some("coffee.svg"));
        assert!(blog.assets_dir.join("coffee.svg").is_file());

        let posts = blog.load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "/hello-world/");
        assert_eq!(posts[0].display_title(), "Hello World");
    }

    #[test]
    fn test_init_refuses_existing_blog() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
