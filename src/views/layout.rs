//! Layout shell shared by every page

use serde::Serialize;

use crate::config::SiteConfig;
use crate::helpers::url_for;

/// How the site title is shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    /// Large title on the index
    Prominent,
    /// Small back-link title on every other page
    Compact,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub style: HeaderStyle,
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Footer {
    pub links: Vec<FooterLink>,
}

/// Header and footer around the page content
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub is_root: bool,
    pub header: Header,
    pub footer: Option<Footer>,
}

impl Layout {
    /// Lay out a page served at `pathname`; the footer only shows on `root_path`
    pub fn new(pathname: &str, root_path: &str, title: &str, footer_links: Vec<FooterLink>) -> Self {
        let is_root = pathname == root_path;
        Self {
            is_root,
            header: Header {
                style: if is_root {
                    HeaderStyle::Prominent
                } else {
                    HeaderStyle::Compact
                },
                title: title.to_string(),
                href: root_path.to_string(),
            },
            footer: is_root.then(|| Footer {
                links: footer_links,
            }),
        }
    }

    /// Lay out the page at site `route` (without the path prefix)
    pub fn for_route(config: &SiteConfig, route: &str) -> Self {
        Self::new(
            &url_for(config, route),
            &url_for(config, "/"),
            &config.site.title,
            contact_links(config),
        )
    }
}

/// Outbound contact links followed by the feed link
pub fn contact_links(config: &SiteConfig) -> Vec<FooterLink> {
    let social = &config.site.social;
    let mut links = Vec::new();

    if !social.email.is_empty() {
        links.push(FooterLink {
            label: "e-mail".to_string(),
            href: format!("mailto:{}", social.email),
        });
    }
    if !social.twitter.is_empty() {
        links.push(FooterLink {
            label: "twitter".to_string(),
            href: format!("https://twitter.com/{}", social.twitter),
        });
    }
    if !social.github.is_empty() {
        links.push(FooterLink {
            label: "github".to_string(),
            href: format!("https://github.com/{}", social.github),
        });
    }
    if config.feed.enable {
        links.push(FooterLink {
            label: "rss".to_string(),
            href: url_for(config, &config.feed.path),
        });
    }

    links
}
