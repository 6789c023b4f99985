//! A single post with its neighbors and comment thread

use serde::Serialize;

use super::layout::Layout;
use super::seo::{Seo, SeoPage};
use crate::comments::{CommentThread, CommentWidget};
use crate::config::SiteConfig;
use crate::content::{NavLink, Navigation, Post};
use crate::helpers::{date_xml, format_date, permalink, url_for};

/// A resolved link to a neighboring post
#[derive(Debug, Clone, Serialize)]
pub struct NavTarget {
    pub slug: String,
    pub title: String,
    pub href: String,
}

impl NavTarget {
    fn resolve(link: &NavLink, config: &SiteConfig) -> Self {
        Self {
            slug: link.slug.clone(),
            title: link.title.clone(),
            href: url_for(config, &link.slug),
        }
    }
}

/// The post page
#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub layout: Layout,
    pub seo: Seo,
    pub title: String,
    pub date: String,
    pub datetime: String,
    /// Trusted HTML body
    pub html: String,
    /// Absolute URL of the cover image, for link previews
    pub preview: Option<String>,
    pub previous: Option<NavTarget>,
    pub next: Option<NavTarget>,
    /// Embedded comment thread (empty when comments are off)
    pub comments: String,
}

impl DetailView {
    pub fn build(
        post: &Post,
        navigation: &Navigation,
        config: &SiteConfig,
        comments: &dyn CommentWidget,
    ) -> Self {
        let title = post.display_title().to_string();
        let preview = post
            .cover
            .as_ref()
            .map(|cover| permalink(config, &cover.src));

        let seo = Seo::new(
            config,
            SeoPage {
                title: &title,
                description: Some(&post.description),
                route: &post.slug,
                image: preview.as_deref(),
                kind: "article",
                keywords: &[],
            },
        );

        let thread = CommentThread {
            identifier: post.id.clone(),
            title: title.clone(),
            url: seo.canonical.clone(),
        };

        Self {
            layout: Layout::for_route(config, &post.slug),
            comments: comments.render(&thread),
            seo,
            date: format_date(&post.date, &config.date_format),
            datetime: date_xml(&post.date),
            html: post.html.clone(),
            preview,
            previous: navigation
                .previous
                .as_ref()
                .map(|link| NavTarget::resolve(link, config)),
            next: navigation
                .next
                .as_ref()
                .map(|link| NavTarget::resolve(link, config)),
            title,
        }
    }
}
