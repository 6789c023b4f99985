//! Post model and navigation between neighboring posts

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::PathBuf;

use crate::helpers::html_escape;

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Stable identifier handed to the comment widget
    pub id: String,

    /// URL path derived from the content location, e.g. `/hello-world/`
    pub slug: String,

    /// Post title, when the front-matter sets one
    pub title: Option<String>,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Hand-written summary (trusted HTML)
    pub summary: Option<String>,

    /// Plain-text excerpt pruned to the index length
    pub excerpt: String,

    /// Plain-text excerpt pruned to the sharing-description length
    pub description: String,

    /// Rendered HTML body
    pub html: String,

    /// Cover image used as the sharing preview
    pub cover: Option<Cover>,

    /// Whether the post is a draft
    pub draft: bool,

    /// Source file path (relative to the content directory)
    pub source: String,

    /// Full source file path
    #[serde(skip)]
    pub full_source: PathBuf,
}

impl Post {
    /// Create a post with only the required fields set
    pub fn new(slug: impl Into<String>, date: DateTime<FixedOffset>) -> Self {
        let slug = slug.into();
        Self {
            id: post_id(&slug),
            source: slug.trim_matches('/').to_string(),
            full_source: PathBuf::new(),
            slug,
            title: None,
            date,
            summary: None,
            excerpt: String::new(),
            description: String::new(),
            html: String::new(),
            cover: None,
            draft: false,
        }
    }

    /// Title to display, falling back to the slug for untitled posts
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.slug)
    }

    /// Summary as HTML: the hand-written one verbatim, else the escaped excerpt
    pub fn summary_html(&self) -> String {
        match self.summary.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(summary) => summary.to_string(),
            None => html_escape(&self.excerpt),
        }
    }
}

/// Identifier derived from the slug so it survives rebuilds
fn post_id(slug: &str) -> String {
    let id = slug::slugify(slug.trim_matches('/'));
    if id.is_empty() {
        "root".to_string()
    } else {
        id
    }
}

/// A cover image copied next to its post
#[derive(Debug, Clone, Serialize)]
pub struct Cover {
    /// Site route of the image (without the path prefix)
    pub src: String,

    /// Source file on disk
    #[serde(skip)]
    pub source: PathBuf,
}

/// Link to a neighboring post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub slug: String,
    pub title: String,
}

impl NavLink {
    fn to(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.display_title().to_string(),
        }
    }
}

/// The neighbors of a post in the newest-first sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// The next-older post
    pub previous: Option<NavLink>,
    /// The next-newer post
    pub next: Option<NavLink>,
}

impl Navigation {
    /// Neighbors of `posts[index]`, where `posts` is ordered newest first
    pub fn around(posts: &[Post], index: usize) -> Self {
        Self {
            previous: posts.get(index + 1).map(NavLink::to),
            next: index
                .checked_sub(1)
                .and_then(|i| posts.get(i))
                .map(NavLink::to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(day: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2020, 1, day, 0, 0, 0)
            .unwrap()
    }

    fn sequence() -> Vec<Post> {
        let mut a = Post::new("/a/", date(3));
        a.title = Some("A".to_string());
        let b = Post::new("/b/", date(2));
        let mut c = Post::new("/c/", date(1));
        c.title = Some("C".to_string());
        vec![a, b, c]
    }

    #[test]
    fn test_display_title_falls_back_to_slug() {
        let posts = sequence();
        assert_eq!(posts[0].display_title(), "A");
        assert_eq!(posts[1].display_title(), "/b/");
    }

    #[test]
    fn test_summary_html() {
        let mut post = Post::new("/a/", date(1));
        post.excerpt = "From the body, where 1 < 2…".to_string();
        assert_eq!(post.summary_html(), "From the body, where 1 &lt; 2…");

        post.summary = Some("<em>Hand</em> written".to_string());
        assert_eq!(post.summary_html(), "<em>Hand</em> written");
    }

    #[test]
    fn test_navigation_at_boundaries() {
        let posts = sequence();

        let newest = Navigation::around(&posts, 0);
        assert_eq!(newest.next, None);
        assert_eq!(newest.previous.as_ref().map(|l| l.slug.as_str()), Some("/b/"));

        let middle = Navigation::around(&posts, 1);
        assert_eq!(middle.next.as_ref().map(|l| l.title.as_str()), Some("A"));
        assert_eq!(middle.previous.as_ref().map(|l| l.title.as_str()), Some("C"));

        let oldest = Navigation::around(&posts, 2);
        assert_eq!(oldest.previous, None);
        assert_eq!(oldest.next.as_ref().map(|l| l.title.as_str()), Some("/b/"));
    }

    #[test]
    fn test_id_is_stable() {
        assert_eq!(Post::new("/hello-world/", date(1)).id, "hello-world");
        assert_eq!(Post::new("/2019/notes/", date(1)).id, "2019-notes");
    }
}
