//! List site content

use anyhow::Result;

use crate::content::Post;
use crate::generator::{MANIFEST_PATH, STYLESHEET_PATH};
use crate::helpers::url_for;
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let posts = blog.load_posts()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.display_title(),
                    post.source
                );
            }
        }
        "route" | "routes" => {
            let routes = routes(blog, &posts);
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {}", route);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, route", content_type);
        }
    }

    Ok(())
}

/// Every URL the generated site serves a page or document at
pub fn routes(blog: &Blog, posts: &[Post]) -> Vec<String> {
    let config = &blog.config;
    let mut routes = vec![url_for(config, "/")];
    routes.extend(posts.iter().map(|post| url_for(config, &post.slug)));
    routes.push(url_for(config, STYLESHEET_PATH));
    if config.feed.enable {
        routes.push(url_for(config, &config.feed.path));
    }
    if config.manifest.enable {
        routes.push(url_for(config, MANIFEST_PATH));
    }
    routes
}
