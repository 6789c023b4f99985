//! Generator module - writes the static site using the built-in Tera templates

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::analytics::Analytics;
use crate::comments::{self, CommentWidget};
use crate::content::loader::{is_markdown_file, Excludes};
use crate::content::{Navigation, Post};
use crate::feed::build_feed;
use crate::helpers::url_for;
use crate::manifest::WebManifest;
use crate::templates::{HeadData, TemplateRenderer};
use crate::typography::Typography;
use crate::views::{DetailView, ListView};
use crate::Blog;

/// Where the typography stylesheet lands under the public directory
pub const STYLESHEET_PATH: &str = "css/typography.css";

/// Where the web app manifest lands under the public directory
pub const MANIFEST_PATH: &str = "manifest.webmanifest";

/// Static site generator using Tera templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
    comments: Box<dyn CommentWidget>,
    typography: Typography,
    head: HeadData,
}

impl Generator {
    /// Create a new generator; fails on a misconfigured comment provider
    pub fn new(blog: &Blog) -> Result<Self> {
        let config = &blog.config;
        let renderer = TemplateRenderer::new()?;
        let comments = comments::from_config(&config.comments)?;
        let typography = Typography::new(&config.typography);
        tracing::debug!("Comment provider: {}", comments.name());

        let head = HeadData {
            site_title: config.site.title.clone(),
            author: config.site.author.clone(),
            description: config.site.description.clone(),
            stylesheet_href: url_for(config, STYLESHEET_PATH),
            google_fonts_url: typography.google_fonts_url(),
            icon_href: config.site.icon.as_deref().map(|icon| url_for(config, icon)),
            manifest_href: config
                .manifest
                .enable
                .then(|| url_for(config, MANIFEST_PATH)),
            theme_color: config.manifest.theme_color.clone(),
            feed_href: config
                .feed
                .enable
                .then(|| url_for(config, &config.feed.path)),
            analytics: Analytics::new(&config.analytics).snippet(),
        };

        Ok(Self {
            blog: blog.clone(),
            renderer,
            comments,
            typography,
            head,
        })
    }

    /// Generate the entire site from posts ordered newest first
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        let public_dir = &self.blog.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        // Images and other files living next to the published posts
        let excludes = Excludes::new(&self.blog.config.exclude);
        let unpublished = self.unpublished_bundles(posts);
        self.copy_dir(&self.blog.content_dir, public_dir, |relative| {
            excludes.matches(relative) || unpublished.iter().any(|dir| relative.starts_with(dir))
        })?;
        // Site-wide assets (icon, fonts) land at the site root
        self.copy_dir(&self.blog.assets_dir, public_dir, |_| false)?;

        self.write_page("/", &self.render_index(posts)?)?;
        for (index, post) in posts.iter().enumerate() {
            self.write_page(&post.slug, &self.render_post(posts, index)?)?;
        }

        self.write_file(STYLESHEET_PATH, &self.typography.stylesheet()?)?;

        let config = &self.blog.config;
        if config.feed.enable {
            self.write_file(&config.feed.path, &build_feed(posts, config)?)?;
            tracing::info!("Generated {}", config.feed.path);
        }
        if config.manifest.enable {
            self.write_file(MANIFEST_PATH, &WebManifest::from_config(config).to_json()?)?;
        }

        tracing::info!("Generated {} posts", posts.len());
        Ok(())
    }

    /// Render the index page
    pub fn render_index(&self, posts: &[Post]) -> Result<String> {
        let view = ListView::build(posts, &self.blog.config, "/");
        self.renderer.render_index(&view, &self.head)
    }

    /// Render `posts[index]` with its neighbors in the sequence
    pub fn render_post(&self, posts: &[Post], index: usize) -> Result<String> {
        let post = posts
            .get(index)
            .with_context(|| format!("No post at position {}", index))?;
        let navigation = Navigation::around(posts, index);
        let view = DetailView::build(
            post,
            &navigation,
            &self.blog.config,
            self.comments.as_ref(),
        );
        self.renderer
            .render_post(&view, &self.head)
            .with_context(|| format!("Failed to render {}", post.slug))
    }

    /// Write a page to `<public>/<route>/index.html`
    fn write_page(&self, route: &str, html: &str) -> Result<()> {
        let route = route.trim_matches('/');
        let relative = if route.is_empty() {
            PathBuf::from("index.html")
        } else {
            Path::new(route).join("index.html")
        };
        self.write_file(&relative.to_string_lossy(), html)
    }

    fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Directories holding an `index.md` that did not become a post (drafts, broken posts)
    fn unpublished_bundles(&self, posts: &[Post]) -> Vec<PathBuf> {
        let content_dir = &self.blog.content_dir;
        WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|path| {
                is_markdown_file(path)
                    && path.file_stem().map(|s| s == "index").unwrap_or(false)
                    && !posts.iter().any(|post| &post.full_source == path)
            })
            .filter_map(|path| {
                let dir = path.parent()?.strip_prefix(content_dir).ok()?;
                // The content root itself is never a bundle
                (!dir.as_os_str().is_empty()).then(|| dir.to_path_buf())
            })
            .collect()
    }

    /// Copy every non-markdown file under `source_dir` keeping relative paths
    fn copy_dir(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        skip: impl Fn(&Path) -> bool,
    ) -> Result<()> {
        if !source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_markdown_file(path) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            if skip(relative) {
                tracing::debug!("Not publishing {:?}", relative);
                continue;
            }
            let dest = dest_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
        }

        Ok(())
    }
}
