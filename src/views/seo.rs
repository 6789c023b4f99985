//! `<head>` metadata for search engines and link previews

use serde::Serialize;

use crate::config::SiteConfig;
use crate::helpers::permalink;

/// A single `<meta>` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    /// `name` or `property`
    pub attr: &'static str,
    pub key: String,
    pub content: String,
}

impl MetaTag {
    fn name(key: &str, content: &str) -> Self {
        Self {
            attr: "name",
            key: key.to_string(),
            content: content.to_string(),
        }
    }

    fn property(key: &str, content: &str) -> Self {
        Self {
            attr: "property",
            key: key.to_string(),
            content: content.to_string(),
        }
    }
}

/// What a page says about itself
pub struct SeoPage<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    /// Site route, without the path prefix
    pub route: &'a str,
    /// Absolute URL of the preview image
    pub image: Option<&'a str>,
    /// `og:type`
    pub kind: &'a str,
    pub keywords: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct Seo {
    pub lang: String,
    pub title: String,
    pub canonical: String,
    pub meta: Vec<MetaTag>,
}

impl Seo {
    pub fn new(config: &SiteConfig, page: SeoPage<'_>) -> Self {
        let site = &config.site;
        let description = page
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or(&site.description);
        let canonical = permalink(config, page.route);

        let mut meta = vec![
            MetaTag::name("description", description),
            MetaTag::property("og:url", &canonical),
            MetaTag::property("og:title", page.title),
        ];
        if let Some(image) = page.image {
            meta.push(MetaTag::property("og:image", image));
        }
        meta.extend([
            MetaTag::property("og:description", description),
            MetaTag::property("og:type", page.kind),
            MetaTag::name("twitter:card", "summary"),
            MetaTag::name("twitter:creator", &site.author),
            MetaTag::name("twitter:title", page.title),
            MetaTag::name("twitter:description", description),
        ]);
        if let Some(verification) = config.google_site_verification.as_deref() {
            meta.push(MetaTag::name("google-site-verification", verification));
        }
        if !page.keywords.is_empty() {
            meta.push(MetaTag::name("keywords", &page.keywords.join(", ")));
        }

        Self {
            lang: config.language.clone(),
            title: format!("{} | {}", site.title, page.title),
            canonical,
            meta,
        }
    }
}
