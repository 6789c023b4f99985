//! brewlog: a static blog generator
//!
//! Posts are Markdown files with YAML front-matter. They are loaded into an
//! ordered collection, turned into page models by the views and rendered with
//! embedded Tera templates into a static site with an RSS feed and a web app
//! manifest.

pub mod analytics;
pub mod commands;
pub mod comments;
pub mod config;
pub mod content;
pub mod feed;
pub mod generator;
pub mod helpers;
pub mod manifest;
pub mod server;
pub mod templates;
pub mod typography;
pub mod views;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// File name of the site configuration
pub const CONFIG_FILE: &str = "_config.yml";

/// A blog rooted at a directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts and the files next to them
    pub content_dir: PathBuf,
    /// Site-wide assets copied to the site root
    pub assets_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Open the blog in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::from_config(base_dir, config))
    }

    /// Open the blog in `base_dir` with an already loaded configuration
    pub fn from_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        Self {
            content_dir: base_dir.join(&config.content_dir),
            assets_dir: base_dir.join(&config.assets_dir),
            public_dir: base_dir.join(&config.public_dir),
            base_dir,
            config,
        }
    }

    /// Site-wide metadata
    pub fn site_metadata(&self) -> &config::SiteMetadata {
        &self.config.site
    }

    /// All published posts, newest first
    pub fn load_posts(&self) -> Result<Vec<content::Post>> {
        content::loader::ContentLoader::new(self).load_posts()
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }

    /// Paths whose changes require a rebuild
    pub fn watch_paths(&self) -> Vec<PathBuf> {
        [
            self.content_dir.clone(),
            self.assets_dir.clone(),
            self.base_dir.join(CONFIG_FILE),
        ]
        .into_iter()
        .filter(|path| path.exists())
        .collect()
    }
}
