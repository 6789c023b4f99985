//! Comment widgets embedded under each post
//!
//! Every backing service gets one adapter implementing [`CommentWidget`];
//! the generator only ever sees the trait object.

use serde::Serialize;

use crate::config::{CommentProvider, CommentsConfig, ConfigError};
use crate::helpers::{html_escape, js_string};

/// What a widget needs to attach a thread to a page
#[derive(Debug, Clone, Serialize)]
pub struct CommentThread {
    pub identifier: String,
    pub title: String,
    pub url: String,
}

/// An embeddable comment thread
pub trait CommentWidget: Send + Sync {
    /// Provider name, for logs
    fn name(&self) -> &'static str;

    /// HTML snippet that embeds the thread
    fn render(&self, thread: &CommentThread) -> String;
}

/// Build the widget selected in the configuration
pub fn from_config(config: &CommentsConfig) -> Result<Box<dyn CommentWidget>, ConfigError> {
    match config.provider {
        CommentProvider::None => Ok(Box::new(Disabled)),
        CommentProvider::Disqus => {
            let shortname =
                config
                    .shortname
                    .clone()
                    .ok_or(ConfigError::MissingCommentOption {
                        provider: "disqus",
                        field: "shortname",
                    })?;
            Ok(Box::new(Disqus { shortname }))
        }
        CommentProvider::Remarkbox => {
            let owner_key =
                config
                    .owner_key
                    .clone()
                    .ok_or(ConfigError::MissingCommentOption {
                        provider: "remarkbox",
                        field: "owner_key",
                    })?;
            Ok(Box::new(Remarkbox { owner_key }))
        }
    }
}

/// Comments turned off
pub struct Disabled;

impl CommentWidget for Disabled {
    fn name(&self) -> &'static str {
        "none"
    }

    fn render(&self, _thread: &CommentThread) -> String {
        String::new()
    }
}

/// Disqus embed
pub struct Disqus {
    pub shortname: String,
}

impl CommentWidget for Disqus {
    fn name(&self) -> &'static str {
        "disqus"
    }

    fn render(&self, thread: &CommentThread) -> String {
        format!(
            r#"<div id="disqus_thread"></div>
<script>
var disqus_config = function () {{
  this.page.url = {url};
  this.page.identifier = {identifier};
  this.page.title = {title};
}};
(function () {{
  var d = document, s = d.createElement('script');
  s.src = 'https://{shortname}.disqus.com/embed.js';
  s.setAttribute('data-timestamp', +new Date());
  (d.head || d.body).appendChild(s);
}})();
</script>
<noscript>Please enable JavaScript to view the comments.</noscript>"#,
            url = js_string(&thread.url),
            identifier = js_string(&thread.identifier),
            title = js_string(&thread.title),
            shortname = html_escape(&self.shortname),
        )
    }
}

/// Remarkbox embed
pub struct Remarkbox {
    pub owner_key: String,
}

impl CommentWidget for Remarkbox {
    fn name(&self) -> &'static str {
        "remarkbox"
    }

    fn render(&self, thread: &CommentThread) -> String {
        format!(
            r##"<div id="remarkbox-div">
  <noscript>
    <iframe id="remarkbox-iframe" src="https://my.remarkbox.com/embed?nojs=true" style="height:600px;width:100%;border:none!important" tabindex="0"></iframe>
  </noscript>
</div>
<script src="https://my.remarkbox.com/static/js/iframe-resizer/iframeResizer.min.js"></script>
<script>
  var rb_owner_key = {owner_key};
  var thread_uri = {url};
  var thread_title = {title};
  var thread_fragment = window.location.hash;
  var rb_src = "https://my.remarkbox.com/embed" +
    "?rb_owner_key=" + rb_owner_key +
    "&thread_title=" + encodeURI(thread_title) +
    "&thread_uri=" + encodeURIComponent(thread_uri) +
    thread_fragment;
  function create_remarkbox_iframe() {{
    var ifrm = document.createElement("iframe");
    ifrm.setAttribute("id", "remarkbox-iframe");
    ifrm.setAttribute("scrolling", "no");
    ifrm.setAttribute("src", rb_src);
    ifrm.setAttribute("frameborder", "0");
    ifrm.setAttribute("tabindex", "0");
    ifrm.setAttribute("title", "Remarkbox");
    ifrm.style.width = "100%";
    document.getElementById("remarkbox-div").appendChild(ifrm);
  }}
  create_remarkbox_iframe();
  iFrameResize({{ checkOrigin: ["https://my.remarkbox.com"], inPageLinks: true }}, "#remarkbox-iframe");
</script>"##,
            owner_key = js_string(&self.owner_key),
            url = js_string(&thread.url),
            title = js_string(&thread.title),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread() -> CommentThread {
        CommentThread {
            identifier: "hello-world".to_string(),
            title: "Hello \"World\"".to_string(),
            url: "https://example.com/blog/hello-world/".to_string(),
        }
    }

    #[test]
    fn test_disabled_renders_nothing() {
        let widget = from_config(&CommentsConfig::default()).unwrap();
        assert_eq!(widget.name(), "none");
        assert!(widget.render(&thread()).is_empty());
    }

    #[test]
    fn test_disqus_embed() {
        let config = CommentsConfig {
            provider: CommentProvider::Disqus,
            shortname: Some("brunoluiz".to_string()),
            owner_key: None,
        };
        let html = from_config(&config).unwrap().render(&thread());
        assert!(html.contains("https://brunoluiz.disqus.com/embed.js"));
        assert!(html.contains(r#"this.page.identifier = "hello-world";"#));
        assert!(html.contains(r#"this.page.title = "Hello \"World\"";"#));
        assert!(html.contains(r#"this.page.url = "https://example.com/blog/hello-world/";"#));
    }

    #[test]
    fn test_remarkbox_embed() {
        let config = CommentsConfig {
            provider: CommentProvider::Remarkbox,
            shortname: None,
            owner_key: Some("key-123".to_string()),
        };
        let html = from_config(&config).unwrap().render(&thread());
        assert!(html.contains(r#"var rb_owner_key = "key-123";"#));
        assert!(html.contains(r#"var thread_uri = "https://example.com/blog/hello-world/";"#));
    }

    #[test]
    fn test_missing_option_is_an_error() {
        let config = CommentsConfig {
            provider: CommentProvider::Remarkbox,
            ..Default::default()
        };
        assert!(from_config(&config).is_err());
    }
}
