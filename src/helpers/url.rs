//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters `encodeURIComponent` leaves untouched besides alphanumerics
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Whether a link points off-site
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with("//")
        || path.starts_with("mailto:")
}

/// Generate a site link with the configured path prefix
///
/// # Examples
/// ```ignore
/// url_for(&config, "/hello-world/") // -> "/blog/hello-world/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let prefix = config.prefix();
    let path = path.trim_start_matches('/');

    format!("{}/{}", prefix, path)
}

/// Generate the canonical, absolute URL of a route
///
/// The configured site URL already carries the path prefix.
///
/// # Examples
/// ```ignore
/// permalink(&config, "/hello-world/") // -> "http://example.com/blog/hello-world/"
/// ```
pub fn permalink(config: &SiteConfig, route: &str) -> String {
    if is_external(route) {
        return route.to_string();
    }

    format!(
        "{}/{}",
        config.site.url.trim_end_matches('/'),
        route.trim_start_matches('/')
    )
}

/// Percent-encode a value the way `encodeURIComponent` does
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.site.url = "https://example.com/blog/".to_string();
        config.path_prefix = "/blog".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/"), "/blog/");
        assert_eq!(url_for(&config, "/hello/"), "/blog/hello/");
        assert_eq!(url_for(&config, "rss.xml"), "/blog/rss.xml");
        assert_eq!(
            url_for(&config, "https://github.com/x"),
            "https://github.com/x"
        );
    }

    #[test]
    fn test_url_for_without_prefix() {
        let config = SiteConfig::default();
        assert_eq!(url_for(&config, "/"), "/");
        assert_eq!(url_for(&config, "/a/"), "/a/");
    }

    #[test]
    fn test_permalink() {
        let config = test_config();
        assert_eq!(
            permalink(&config, "/hello/"),
            "https://example.com/blog/hello/"
        );
        assert_eq!(
            permalink(&config, "/hello/cover.png"),
            "https://example.com/blog/hello/cover.png"
        );
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(
            encode_uri_component("https://a.com/x?y=1&z=two words"),
            "https%3A%2F%2Fa.com%2Fx%3Fy%3D1%26z%3Dtwo%20words"
        );
        assert_eq!(encode_uri_component("it's-(ok)_~!*."), "it's-(ok)_~!*.");
    }
}
