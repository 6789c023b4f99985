//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Blog;

/// Load every post and write the whole site
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    // Fail on bad comment settings before touching any content
    let generator = Generator::new(blog)?;

    let posts = blog.load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(blog: &Blog) -> Result<()> {
    let blog = blog.clone();
    tokio::task::spawn_blocking(move || watch_with(&blog, || {})).await?
}

/// Watch the blog sources and regenerate after each burst of changes
///
/// `on_rebuilt` runs after every successful regeneration.
pub fn watch_with(blog: &Blog, on_rebuilt: impl FnMut()) -> Result<()> {
    let (tx, rx) = channel();

    // Debounce to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for path in blog.watch_paths() {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    rebuild_on_change(blog, &rx, on_rebuilt);
    Ok(())
}

/// Regenerate once per debounced batch until the watcher goes away
fn rebuild_on_change(
    blog: &Blog,
    rx: &Receiver<DebounceEventResult>,
    mut on_rebuilt: impl FnMut(),
) {
    for result in rx.iter() {
        match result {
            Ok(events) => {
                let relevant: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match reload(blog).and_then(|fresh| run(&fresh)) {
                    Ok(()) => {
                        tracing::info!("Regenerated successfully");
                        on_rebuilt();
                    }
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }
}

/// Editor droppings and VCS internals never trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    let path = path.to_string_lossy();
    !path.contains(".git")
        && !path.contains(".DS_Store")
        && !path.ends_with('~')
        && !path.ends_with(".swp")
}

/// Re-read the configuration, keeping flags given on the command line
pub fn reload(blog: &Blog) -> Result<Blog> {
    let mut fresh = Blog::new(&blog.base_dir)?;
    fresh.config.strict |= blog.config.strict;
    fresh.config.render_drafts |= blog.config.render_drafts;
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use notify_debouncer_mini::{DebouncedEvent, DebouncedEventKind};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_strict_build_fails_on_undated_post() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        let lenient = Blog::from_config(dir.path(), config.clone());
        fs::create_dir_all(&lenient.content_dir).unwrap();
        fs::write(
            lenient.content_dir.join("undated.md"),
            "---\ntitle: Undated\n---\nNo date here.\n",
        )
        .unwrap();

        run(&lenient).unwrap();
        assert!(lenient.public_dir.join("index.html").is_file());
        assert!(!lenient.public_dir.join("undated/index.html").exists());

        config.strict = true;
        let strict = Blog::from_config(dir.path(), config);
        assert!(run(&strict).is_err());
    }

    fn changed(path: &Path) -> DebounceEventResult {
        Ok(vec![DebouncedEvent {
            path: path.to_path_buf(),
            kind: DebouncedEventKind::Any,
        }])
    }

    #[test]
    fn test_every_batch_after_a_rebuild_regenerates() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::from_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&blog.content_dir).unwrap();
        let post = blog.content_dir.join("a.md");
        fs::write(&post, "---\ntitle: Old\ndate: 2020-01-01\n---\n").unwrap();

        // An atomic save: temp file written, then renamed over the post
        let (tx, rx) = channel();
        tx.send(changed(&blog.content_dir.join(".a.md.tmp"))).unwrap();
        tx.send(changed(&post)).unwrap();
        tx.send(changed(&blog.content_dir.join("a.md~"))).unwrap();
        drop(tx);

        fs::write(&post, "---\ntitle: New\ndate: 2020-01-01\n---\n").unwrap();
        let mut rebuilds = 0;
        rebuild_on_change(&blog, &rx, || rebuilds += 1);

        assert_eq!(rebuilds, 2);
        let page = fs::read_to_string(blog.public_dir.join("a/index.html")).unwrap();
        assert!(page.contains("New"));
    }

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("content/blog/a/index.md")));
        assert!(!is_relevant(Path::new("content/blog/.git/HEAD")));
        assert!(!is_relevant(Path::new("content/blog/a/index.md~")));
    }

    #[test]
    fn test_reload_keeps_cli_flags() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "site:\n  title: Fresh\n").unwrap();
        let mut config = SiteConfig::default();
        config.strict = true;
        let blog = Blog::from_config(dir.path(), config);

        let fresh = reload(&blog).unwrap();
        assert_eq!(fresh.config.site.title, "Fresh");
        assert!(fresh.config.strict);
    }
}
