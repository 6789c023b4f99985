//! Built-in blog templates using the Tera template engine
//!
//! The templates are embedded in the binary. Views hand over fully resolved
//! page models, so the templates only lay out markup.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::html_escape;
use crate::views::{DetailView, ListView};

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Text is escaped explicitly with `escape_html`; bodies, summaries
        // and widget snippets are trusted HTML.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("partials/head.html", include_str!("blog/partials/head.html")),
            (
                "partials/header.html",
                include_str!("blog/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("blog/partials/footer.html"),
            ),
            ("partials/bio.html", include_str!("blog/partials/bio.html")),
            ("partials/nav.html", include_str!("blog/partials/nav.html")),
        ])?;

        tera.register_filter("escape_html", escape_html_filter);

        Ok(Self { tera })
    }

    /// Render the index page
    pub fn render_index(&self, view: &ListView, head: &HeadData) -> Result<String> {
        let mut context = Context::new();
        context.insert("head", head);
        context.insert("layout", &view.layout);
        context.insert("seo", &view.seo);
        context.insert("entries", &view.entries);
        self.render("index.html", &context)
    }

    /// Render a post page
    pub fn render_post(&self, view: &DetailView, head: &HeadData) -> Result<String> {
        let mut context = Context::new();
        context.insert("head", head);
        context.insert("layout", &view.layout);
        context.insert("seo", &view.seo);
        context.insert("post", view);
        self.render("post.html", &context)
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape text for HTML content and attributes
fn escape_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_html", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Site-wide data shared by every page
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadData {
    pub site_title: String,
    pub author: String,
    pub description: String,
    pub stylesheet_href: String,
    pub google_fonts_url: Option<String>,
    pub icon_href: Option<String>,
    pub manifest_href: Option<String>,
    pub theme_color: String,
    pub feed_href: Option<String>,
    /// Trusted HTML appended to `<body>`
    pub analytics: String,
}
