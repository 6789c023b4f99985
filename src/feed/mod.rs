//! RSS 2.0 feed of the newest posts

use anyhow::{anyhow, Result};
use rss::{validation::Validate, ChannelBuilder, GuidBuilder, ItemBuilder};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::permalink;

/// Build the feed XML from posts ordered newest first
pub fn build_feed(posts: &[Post], config: &SiteConfig) -> Result<String> {
    let items: Vec<_> = posts
        .iter()
        .take(config.feed.limit)
        .map(|post| post_to_item(post, config))
        .collect();

    let channel = ChannelBuilder::default()
        .title(&config.site.title)
        .link(permalink(config, "/"))
        .description(&config.site.description)
        .language(Some(config.language.clone()))
        .generator(Some(format!("brewlog {}", env!("CARGO_PKG_VERSION"))))
        .last_build_date(posts.first().map(|post| post.date.to_rfc2822()))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn post_to_item(post: &Post, config: &SiteConfig) -> rss::Item {
    let link = permalink(config, &post.slug);

    ItemBuilder::default()
        .title(Some(post.display_title().to_string()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description(Some(post.summary_html()))
        .pub_date(Some(post.date.to_rfc2822()))
        .content(Some(post.html.clone()))
        .build()
}
