//! Content loader - loads posts from the content directory

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use super::{prune, ContentError, Cover, FrontMatter, MarkdownRenderer, Post};
use crate::helpers::url_for;
use crate::Blog;

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
    exclude: Excludes,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        let renderer = MarkdownRenderer::new(&blog.config.markdown);
        let exclude = Excludes::new(&blog.config.exclude);
        Self {
            blog,
            renderer,
            exclude,
        }
    }

    /// Load all posts, newest first
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let content_dir = &self.blog.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) || self.is_excluded(path) {
                continue;
            }

            match self.load_post(path) {
                Ok(post) => {
                    if !post.draft || self.blog.config.render_drafts {
                        posts.push(post);
                    }
                }
                Err(e) if self.blog.config.strict => return Err(e),
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {:#}", path, e);
                }
            }
        }

        check_slugs(&posts)?;

        // Stable: posts sharing a date keep their file order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&content);

        let date = match fm.date.as_deref() {
            None => {
                return Err(ContentError::MissingDate {
                    path: path.to_path_buf(),
                }
                .into())
            }
            Some(value) => fm
                .parse_date(self.blog.config.tz())
                .ok_or_else(|| ContentError::InvalidDate {
                    path: path.to_path_buf(),
                    value: value.to_string(),
                })?,
        };

        let relative = path.strip_prefix(&self.blog.content_dir).unwrap_or(path);
        let slug = slug_for(relative);

        if fm.title.is_none() {
            tracing::warn!("{:?} has no title, using its slug {}", relative, slug);
        }

        let base = relative.parent().unwrap_or_else(|| Path::new(""));
        let rendered = self
            .renderer
            .render_with(body, |src| self.image_url(base, src))?;
        let cover = fm
            .cover
            .as_deref()
            .and_then(|cover| self.resolve_cover(relative, cover));

        let mut post = Post::new(slug, date);
        post.title = fm.title;
        post.summary = fm.summary;
        post.excerpt = prune(&rendered.text, self.blog.config.excerpt.list);
        post.description = prune(&rendered.text, self.blog.config.excerpt.description);
        post.html = rendered.html;
        post.cover = cover;
        post.draft = fm.draft;
        post.source = relative.to_string_lossy().to_string();
        post.full_source = path.to_path_buf();

        Ok(post)
    }

    /// Site URL of an image next to the post; absolute and external sources are kept
    fn image_url(&self, base: &Path, src: &str) -> String {
        if !is_relative_src(src) {
            return src.to_string();
        }
        match normalize(&base.join(src)) {
            Some(relative) => url_for(&self.blog.config, &route_of(&relative)),
            None => {
                tracing::warn!("Image {:?} points outside the content directory", src);
                src.to_string()
            }
        }
    }

    /// Resolve a cover path relative to its post; a missing file means no cover
    fn resolve_cover(&self, post_relative: &Path, cover: &str) -> Option<Cover> {
        let base = post_relative.parent().unwrap_or_else(|| Path::new(""));
        let found = normalize(&base.join(cover))
            .map(|relative| (self.blog.content_dir.join(&relative), relative))
            .filter(|(source, _)| source.is_file());

        let Some((source, relative)) = found else {
            tracing::warn!(
                "Cover {:?} of {:?} not found, rendering without preview",
                cover,
                post_relative
            );
            return None;
        };

        Some(Cover {
            src: route_of(&relative),
            source,
        })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.blog.content_dir).unwrap_or(path);
        self.exclude.matches(relative)
    }
}

/// Compiled `exclude` globs, matched against paths under the content directory
pub(crate) struct Excludes(Vec<glob::Pattern>);

impl Excludes {
    pub(crate) fn new(patterns: &[String]) -> Self {
        // Patterns were checked when the config was loaded
        Self(
            patterns
                .iter()
                .filter_map(|p| glob::Pattern::new(p).ok())
                .collect(),
        )
    }

    pub(crate) fn matches(&self, relative: &Path) -> bool {
        self.0.iter().any(|p| p.matches_path(relative))
    }
}

/// Derive the URL slug of a post from its path under the content directory
///
/// `hello-world/index.md` and `hello-world.md` both become `/hello-world/`.
pub fn slug_for(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let mut parts: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    if parts.last().map(|p| p == "index").unwrap_or(false) {
        parts.pop();
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", parts.join("/"))
    }
}

/// Site path of a file under the content directory
fn route_of(relative: &Path) -> String {
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    format!("/{}", parts.join("/"))
}

/// Whether an image source is a path next to the post
fn is_relative_src(src: &str) -> bool {
    !(src.is_empty() || src.starts_with('/') || src.starts_with('#') || src.contains(':'))
}

/// Resolve `.` and `..` without touching the filesystem; escaping the root yields None
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

fn check_slugs(posts: &[Post]) -> Result<(), ContentError> {
    let mut seen: HashMap<&str, &Post> = HashMap::new();
    for post in posts {
        if post.slug == "/" {
            return Err(ContentError::ReservedSlug {
                path: post.full_source.clone(),
            });
        }
        if let Some(first) = seen.insert(&post.slug, post) {
            return Err(ContentError::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.full_source.clone(),
                second: post.full_source.clone(),
            });
        }
    }
    Ok(())
}

/// Check if a file is a markdown file
pub(crate) fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
