//! Web app manifest

use serde::Serialize;

use crate::config::SiteConfig;
use crate::helpers::url_for;

#[derive(Debug, Serialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub start_url: String,
    pub background_color: String,
    pub theme_color: String,
    pub display: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl WebManifest {
    /// Manifest for the site; names default to the site title
    pub fn from_config(config: &SiteConfig) -> Self {
        let manifest = &config.manifest;
        let name = manifest
            .name
            .clone()
            .unwrap_or_else(|| config.site.title.clone());
        let short_name = manifest.short_name.clone().unwrap_or_else(|| name.clone());

        let icons = config
            .site
            .icon
            .as_deref()
            .map(|icon| ManifestIcon {
                src: url_for(config, icon),
                sizes: if icon.ends_with(".svg") { "any" } else { "512x512" }.to_string(),
                kind: mime_for(icon).to_string(),
            })
            .into_iter()
            .collect();

        Self {
            name,
            short_name,
            start_url: url_for(config, &manifest.start_url),
            background_color: manifest.background_color.clone(),
            theme_color: manifest.theme_color.clone(),
            display: manifest.display.clone(),
            icons,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn mime_for(path: &str) -> &'static str {
    match path.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let mut config = SiteConfig::default();
        config.site.title = "Bruno Luiz Blog".to_string();
        let manifest = WebManifest::from_config(&config);

        assert_eq!(manifest.name, "Bruno Luiz Blog");
        assert_eq!(manifest.short_name, "Bruno Luiz Blog");
        assert_eq!(manifest.start_url, "/");
        assert_eq!(manifest.background_color, "#ffffff");
        assert_eq!(manifest.theme_color, "#663399");
        assert_eq!(manifest.display, "minimal-ui");
        assert!(manifest.icons.is_empty());
    }

    #[test]
    fn test_icon_and_prefix() {
        let mut config = SiteConfig::default();
        config.path_prefix = "/blog".to_string();
        config.site.icon = Some("coffee.svg".to_string());
        config.manifest.short_name = Some("Blog".to_string());

        let json: serde_json::Value =
            serde_json::from_str(&WebManifest::from_config(&config).to_json().unwrap()).unwrap();
        assert_eq!(json["short_name"], "Blog");
        assert_eq!(json["start_url"], "/blog/");
        assert_eq!(json["icons"][0]["src"], "/blog/coffee.svg");
        assert_eq!(json["icons"][0]["type"], "image/svg+xml");
    }
}
