//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while validating a loaded configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown timezone `{0}`")]
    InvalidTimezone(String),

    #[error("comment provider `{provider}` requires `comments.{field}`")]
    MissingCommentOption {
        provider: &'static str,
        field: &'static str,
    },

    #[error("invalid exclude pattern `{pattern}`: {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub site: SiteMetadata,
    pub language: String,
    pub timezone: Option<String>,
    pub keywords: Vec<String>,
    pub google_site_verification: Option<String>,

    // URL
    /// Prefix every generated link is served under, e.g. `/blog`
    pub path_prefix: String,

    // Directory
    pub content_dir: String,
    pub assets_dir: String,
    pub public_dir: String,
    #[serde(default)]
    pub exclude: Vec<String>,

    // Writing
    pub date_format: String,
    pub render_drafts: bool,
    /// Fail the build on a post that cannot be loaded instead of skipping it
    pub strict: bool,
    pub excerpt: ExcerptConfig,
    pub markdown: MarkdownConfig,

    // Integrations
    pub comments: CommentsConfig,
    pub analytics: AnalyticsConfig,
    pub feed: FeedConfig,
    pub manifest: ManifestConfig,
    pub typography: TypographyConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteMetadata::default(),
            language: "en".to_string(),
            timezone: None,
            keywords: vec!["blog".to_string()],
            google_site_verification: None,

            path_prefix: String::new(),

            content_dir: "content/blog".to_string(),
            assets_dir: "content/assets".to_string(),
            public_dir: "public".to_string(),
            exclude: Vec::new(),

            date_format: "MMMM DD, YYYY".to_string(),
            render_drafts: false,
            strict: false,
            excerpt: ExcerptConfig::default(),
            markdown: MarkdownConfig::default(),

            comments: CommentsConfig::default(),
            analytics: AnalyticsConfig::default(),
            feed: FeedConfig::default(),
            manifest: ManifestConfig::default(),
            typography: TypographyConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that can only be judged once the whole file is read
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tz) = &self.timezone {
            tz.parse::<chrono_tz::Tz>()
                .map_err(|_| ConfigError::InvalidTimezone(tz.clone()))?;
        }

        for pattern in &self.exclude {
            glob::Pattern::new(pattern).map_err(|source| ConfigError::InvalidExcludePattern {
                pattern: pattern.clone(),
                source,
            })?;
        }

        match self.comments.provider {
            CommentProvider::Disqus if self.comments.shortname.is_none() => {
                Err(ConfigError::MissingCommentOption {
                    provider: "disqus",
                    field: "shortname",
                })
            }
            CommentProvider::Remarkbox if self.comments.owner_key.is_none() => {
                Err(ConfigError::MissingCommentOption {
                    provider: "remarkbox",
                    field: "owner_key",
                })
            }
            _ => Ok(()),
        }
    }

    /// The path prefix normalized to `/prefix` (or empty for the domain root)
    pub fn prefix(&self) -> &str {
        self.path_prefix.trim_end_matches('/')
    }

    /// Parsed timezone used to interpret front-matter dates
    pub fn tz(&self) -> Option<chrono_tz::Tz> {
        self.timezone.as_ref().and_then(|tz| tz.parse().ok())
    }
}

/// Read-only metadata shared by every rendered page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMetadata {
    pub title: String,
    pub author: String,
    pub description: String,
    /// Canonical URL of the site, including the path prefix
    pub url: String,
    pub social: Social,
    /// Icon path relative to the assets directory
    pub icon: Option<String>,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            author: "John Doe".to_string(),
            description: String::new(),
            url: "http://example.com".to_string(),
            social: Social::default(),
            icon: None,
        }
    }
}

/// Social handles rendered as footer links
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    pub email: String,
    pub twitter: String,
    pub github: String,
}

/// Plain-text excerpt lengths
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    /// Length of the summary fallback on the index page
    pub list: usize,
    /// Length of the sharing description on post pages
    pub description: usize,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            list: 180,
            description: 240,
        }
    }
}

/// Markdown rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub highlight_theme: String,
    pub line_numbers: bool,
    pub class_prefix: String,
    /// Marker separating a language from inline code, e.g. `rust>let x = 1;`
    pub inline_code_marker: Option<String>,
    pub image_max_width: u32,
    pub iframe_wrapper_style: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            highlight_theme: "InspiredGitHub".to_string(),
            line_numbers: true,
            class_prefix: "language-".to_string(),
            inline_code_marker: Some(">".to_string()),
            image_max_width: 720,
            iframe_wrapper_style: "margin-bottom: 1.0725rem".to_string(),
        }
    }
}

/// Which comment widget is embedded under each post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentProvider {
    #[default]
    None,
    Disqus,
    Remarkbox,
}

/// Comment widget configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub provider: CommentProvider,
    /// Disqus forum shortname
    pub shortname: Option<String>,
    /// Remarkbox owner key
    pub owner_key: Option<String>,
}

/// Analytics configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Tracking pixel endpoint hit once per page load
    pub pixel_endpoint: Option<String>,
    pub google_tracking_id: Option<String>,
}

/// RSS feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enable: bool,
    pub path: String,
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "rss.xml".to_string(),
            limit: 20,
        }
    }
}

/// Web app manifest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    pub enable: bool,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub start_url: String,
    pub background_color: String,
    pub theme_color: String,
    pub display: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            enable: true,
            name: None,
            short_name: None,
            start_url: "/".to_string(),
            background_color: "#ffffff".to_string(),
            theme_color: "#663399".to_string(),
            display: "minimal-ui".to_string(),
        }
    }
}

/// A Google Fonts family and the styles to request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleFont {
    pub name: String,
    pub styles: Vec<String>,
}

/// Vertical rhythm and font settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyConfig {
    /// Base font size in pixels
    pub base_font_size: f64,
    pub base_line_height: f64,
    pub scale_ratio: f64,
    pub header_weight: u32,
    pub body_weight: u32,
    pub bold_weight: u32,
    pub header_color: String,
    pub body_color: String,
    pub link_color: String,
    pub blockquote_color: String,
    pub header_font_family: Vec<String>,
    pub body_font_family: Vec<String>,
    pub google_fonts: Vec<GoogleFont>,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            base_font_size: 17.0,
            base_line_height: 1.75,
            scale_ratio: 2.0,
            header_weight: 500,
            body_weight: 400,
            bold_weight: 700,
            header_color: "hsla(0,0%,0%,1)".to_string(),
            body_color: "hsla(0,0%,0%,0.8)".to_string(),
            link_color: "#d65947".to_string(),
            blockquote_color: "#fca206".to_string(),
            header_font_family: ["Merriweather", "Helvetica Neue", "Helvetica", "Arial", "sans-serif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            body_font_family: ["Lora", "Helvetica Neue", "sans-serif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            google_fonts: vec![
                GoogleFont {
                    name: "Lora".to_string(),
                    styles: ["400", "300", "400i", "300i", "700"]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                },
                GoogleFont {
                    name: "Merriweather".to_string(),
                    styles: vec!["400".to_string(), "700".to_string()],
                },
            ],
        }
    }
}
