//! Page-view analytics
//!
//! A tracking pixel is requested once per page load with the page URL, the
//! referrer and a timestamp. The request is fire-and-forget: nothing reads
//! the response and a failed request does not affect the page.

use crate::config::AnalyticsConfig;
use crate::helpers::{encode_uri_component, js_string};

/// Build the tracking pixel URL
///
/// `{endpoint}?u={page_url}&r={referrer}&t={timestamp}`, where the referrer
/// is omitted when there is none.
pub fn pixel_url(endpoint: &str, page_url: &str, referrer: Option<&str>, timestamp_ms: i64) -> String {
    let referrer = referrer
        .filter(|r| !r.is_empty())
        .map(|r| format!("&r={}", encode_uri_component(r)))
        .unwrap_or_default();

    format!(
        "{}?u={}{}&t={}",
        endpoint,
        encode_uri_component(page_url),
        referrer,
        timestamp_ms
    )
}

/// Client-side snippets injected into every page
pub struct Analytics {
    config: AnalyticsConfig,
}

impl Analytics {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// HTML to place at the end of `<body>`; empty when nothing is configured
    pub fn snippet(&self) -> String {
        let mut html = String::new();

        if let Some(endpoint) = self.config.pixel_endpoint.as_deref() {
            // Same construction as `pixel_url`, run in the browser on load
            html.push_str(&format!(
                r#"<script>
(function () {{
  var endpoint = {endpoint};
  var path = 'u=' + encodeURIComponent(window.location.href);
  var referrer = document.referrer ? '&r=' + encodeURIComponent(document.referrer) : '';
  var time = '&t=' + new Date().getTime();
  var pixel = new Image(1, 1);
  pixel.src = endpoint + '?' + path + referrer + time;
}})();
</script>
"#,
                endpoint = js_string(endpoint)
            ));
        }

        if let Some(id) = self.config.google_tracking_id.as_deref() {
            html.push_str(&format!(
                r#"<script async src="https://www.googletagmanager.com/gtag/js?id={id_param}"></script>
<script>
window.dataLayer = window.dataLayer || [];
function gtag(){{dataLayer.push(arguments);}}
gtag('js', new Date());
gtag('config', {id});
</script>
"#,
                id_param = encode_uri_component(id),
                id = js_string(id)
            ));
        }

        html
    }
}
