//! End-to-end builds of small blogs

use brewlog::config::SiteConfig;
use brewlog::Blog;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(blog: &Blog, relative: &str) -> String {
    fs::read_to_string(blog.public_dir.join(relative)).unwrap()
}

/// Two posts: `/a/` on 2020-01-02 and `/b/` on 2020-01-01
fn two_post_blog(config: &str) -> (TempDir, Blog) {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "_config.yml", config);
    write(
        dir.path(),
        "content/blog/a/index.md",
        "---\ntitle: Post A\ndate: 2020-01-02\n---\n\nThe body of **A**.\n",
    );
    write(
        dir.path(),
        "content/blog/b.md",
        "---\ntitle: Post B\ndate: 2020-01-01\nsummary: A <em>hand-written</em> summary\n---\n\nThe body of B.\n",
    );
    let blog = Blog::new(dir.path()).unwrap();
    (dir, blog)
}

const CONFIG: &str = r#"
site:
  title: Coffee Notes
  author: Bruno
  url: https://example.com
  social:
    email: me@example.com
    twitter: brunoluiz
    github: brunoluiz
"#;

#[test]
fn test_index_lists_posts_newest_first() {
    let (_dir, blog) = two_post_blog(CONFIG);
    blog.generate().unwrap();

    let index = read(&blog, "index.html");
    let a = index.find(r#"<a href="/a/">Post A</a>"#).unwrap();
    let b = index.find(r#"<a href="/b/">Post B</a>"#).unwrap();
    assert!(a < b);

    assert!(index.contains("<p>The body of A.</p>"));
    assert!(index.contains("<p>A <em>hand-written</em> summary</p>"));
    assert!(index.contains("January 02, 2020"));
    assert!(index.contains(r#"<h1 class="brand-title">"#));
    assert!(index.contains("<title>Coffee Notes | All posts</title>"));
}

#[test]
fn test_footer_only_on_index() {
    let (_dir, blog) = two_post_blog(CONFIG);
    blog.generate().unwrap();

    let index = read(&blog, "index.html");
    assert!(index.contains("<footer>"));
    assert!(index.contains(r#"<a href="mailto:me@example.com">e-mail</a> • "#));
    assert!(index.contains(r#"<a href="/rss.xml">rss</a>"#));

    let post = read(&blog, "a/index.html");
    assert!(!post.contains("<footer>"));
    assert!(post.contains(r#"<h3 class="brand-title-on-post">"#));
}

#[test]
fn test_post_navigation_at_boundaries() {
    let (_dir, blog) = two_post_blog(CONFIG);
    blog.generate().unwrap();

    let newest = read(&blog, "a/index.html");
    assert!(!newest.contains(r#"rel="next""#));
    assert!(newest.contains(r#"<a href="/b/" rel="prev">← Post B</a>"#));

    let oldest = read(&blog, "b/index.html");
    assert!(!oldest.contains(r#"rel="prev""#));
    assert!(oldest.contains(r#"<a href="/a/" rel="next">Post A →</a>"#));
}

#[test]
fn test_post_without_cover_has_no_preview() {
    let (_dir, blog) = two_post_blog(CONFIG);
    blog.generate().unwrap();

    let post = read(&blog, "a/index.html");
    assert!(post.contains(r#"<meta property="og:type" content="article">"#));
    assert!(post.contains(r#"<link rel="canonical" href="https://example.com/a/">"#));
    assert!(!post.contains("og:image"));
}

#[test]
fn test_cover_becomes_preview_and_is_copied() {
    let (dir, _) = two_post_blog(CONFIG);
    write(
        dir.path(),
        "content/blog/c/index.md",
        "---\ntitle: Post C\ndate: 2020-01-03\ncover: ./cover.png\n---\n\nWith a cover.\n",
    );
    write(dir.path(), "content/blog/c/cover.png", "png");
    let blog = Blog::new(dir.path()).unwrap();
    blog.generate().unwrap();

    let post = read(&blog, "c/index.html");
    assert!(post.contains(r#"<meta property="og:image" content="https://example.com/c/cover.png">"#));
    assert!(blog.public_dir.join("c/cover.png").is_file());
}

#[test]
fn test_flat_post_images_resolve_next_to_the_source() {
    let (dir, _) = two_post_blog(CONFIG);
    write(
        dir.path(),
        "content/blog/notes.md",
        "---\ntitle: Notes\ndate: 2020-01-04\n---\n\n![pic](./pic.png)\n",
    );
    write(dir.path(), "content/blog/pic.png", "png");
    let blog = Blog::new(dir.path()).unwrap();
    blog.generate().unwrap();

    let post = read(&blog, "notes/index.html");
    assert!(post.contains(r#"<img src="/pic.png" alt="pic""#));
    assert!(blog.public_dir.join("pic.png").is_file());
}

#[test]
fn test_feed_and_manifest() {
    let (_dir, blog) = two_post_blog(CONFIG);
    blog.generate().unwrap();

    let feed = read(&blog, "rss.xml");
    let channel = feed.parse::<rss::Channel>().unwrap();
    let links: Vec<_> = channel.items().iter().filter_map(|i| i.link()).collect();
    assert_eq!(links, ["https://example.com/a/", "https://example.com/b/"]);

    let manifest: serde_json::Value = serde_json::from_str(&read(&blog, "manifest.webmanifest")).unwrap();
    assert_eq!(manifest["name"], "Coffee Notes");
    assert_eq!(manifest["display"], "minimal-ui");

    let css = read(&blog, "css/typography.css");
    assert!(css.contains("#d65947"));
}

#[test]
fn test_path_prefix() {
    let config = format!("{}path_prefix: /blog\n", CONFIG.replace("https://example.com", "https://example.com/blog"));
    let (_dir, blog) = two_post_blog(&config);
    blog.generate().unwrap();

    // Output paths stay prefix-free; links carry the prefix
    let index = read(&blog, "index.html");
    assert!(index.contains(r#"<a href="/blog/a/">Post A</a>"#));
    assert!(index.contains(r#"<a href="/blog/rss.xml">rss</a>"#));
    assert!(index.contains(r#"href="/blog/css/typography.css""#));

    let post = read(&blog, "a/index.html");
    assert!(post.contains(r#"<link rel="canonical" href="https://example.com/blog/a/">"#));
    assert!(!post.contains("<footer>"));
}

#[test]
fn test_duplicate_slugs_fail_the_build() {
    let (dir, _) = two_post_blog(CONFIG);
    write(
        dir.path(),
        "content/blog/a.md",
        "---\ntitle: Another A\ndate: 2021-01-01\n---\n",
    );
    let blog = Blog::new(dir.path()).unwrap();
    let err = blog.generate().unwrap_err();
    assert!(format!("{:#}", err).contains("/a/"));
}

#[test]
fn test_disqus_without_shortname_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut config = SiteConfig::default();
    config.comments.provider = brewlog::config::CommentProvider::Disqus;
    let blog = Blog::from_config(dir.path(), config);
    assert!(blog.generate().is_err());
    assert!(!blog.public_dir.exists());
}

#[test]
fn test_comments_embedded_under_post() {
    let config = format!("{}comments:\n  provider: disqus\n  shortname: coffee\n", CONFIG);
    let (_dir, blog) = two_post_blog(&config);
    blog.generate().unwrap();

    let post = read(&blog, "a/index.html");
    assert!(post.contains("coffee.disqus.com"));
    assert!(post.contains(r#"this.page.url = "https://example.com/a/";"#));
    assert!(!read(&blog, "index.html").contains("disqus"));
}
