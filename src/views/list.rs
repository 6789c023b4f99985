//! Index of all posts

use serde::Serialize;

use super::layout::Layout;
use super::seo::{Seo, SeoPage};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{date_xml, format_date, permalink, url_for};

/// One summary block on the index
#[derive(Debug, Clone, Serialize)]
pub struct ListEntry {
    pub title: String,
    pub slug: String,
    pub href: String,
    pub date: String,
    pub datetime: String,
    /// Trusted HTML
    pub summary: String,
}

impl ListEntry {
    pub fn from_post(post: &Post, config: &SiteConfig) -> Self {
        Self {
            title: post.display_title().to_string(),
            slug: post.slug.clone(),
            href: url_for(config, &post.slug),
            date: format_date(&post.date, &config.date_format),
            datetime: date_xml(&post.date),
            summary: post.summary_html(),
        }
    }
}

/// The index page
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub layout: Layout,
    pub seo: Seo,
    pub entries: Vec<ListEntry>,
}

impl ListView {
    /// Build the index at `route` from posts already ordered newest first
    pub fn build(posts: &[Post], config: &SiteConfig, route: &str) -> Self {
        let icon = config
            .site
            .icon
            .as_deref()
            .map(|icon| permalink(config, icon));

        let seo = Seo::new(
            config,
            SeoPage {
                title: "All posts",
                description: None,
                route,
                image: icon.as_deref(),
                kind: "website",
                keywords: &config.keywords,
            },
        );

        Self {
            layout: Layout::for_route(config, route),
            seo,
            entries: posts
                .iter()
                .map(|post| ListEntry::from_post(post, config))
                .collect(),
        }
    }
}
