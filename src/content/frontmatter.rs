//! Front-matter parsing

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Front-matter data of a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    /// Hand-written summary shown on the index instead of the excerpt
    pub summary: Option<String>,
    /// Cover image path relative to the post file
    pub cover: Option<String>,
    pub draft: bool,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        if !trimmed.starts_with("---") {
            return (FrontMatter::default(), content);
        }

        let rest = trimmed[3..].trim_start_matches(['\n', '\r']);
        let Some(end_pos) = rest.find("\n---") else {
            return (FrontMatter::default(), content);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        // A leading `---` may just be a thematic break followed by prose
        if !yaml_content.lines().any(looks_like_yaml_key) {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    /// Parse the date, reading zone-less values in `tz` (UTC when unset)
    pub fn parse_date(&self, tz: Option<Tz>) -> Option<DateTime<FixedOffset>> {
        self.date.as_deref().and_then(|s| parse_date_string(s, tz))
    }
}

/// `key: value` or `key:` with a plain identifier key
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }

    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };
    let key = &trimmed[..colon_pos];
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp" | "mailto");

    let after_colon = &trimmed[colon_pos + 1..];
    is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
}

/// Parse a date string in various formats
fn parse_date_string(s: &str, tz: Option<Tz>) -> Option<DateTime<FixedOffset>> {
    let s = s.trim().trim_matches(['"', '\'']);

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt);
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    let naive = formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d", "%Y/%m/%d"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    match tz {
        Some(tz) => tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.fixed_offset()),
        None => Some(Utc.from_utc_datetime(&naive).fixed_offset()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
summary: A <em>short</em> intro
cover: ./cover.jpg
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.summary.as_deref(), Some("A <em>short</em> intro"));
        assert_eq!(fm.cover.as_deref(), Some("./cover.jpg"));
        assert!(!fm.draft);
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("Just text.\n");
        assert!(fm.title.is_none());
        assert_eq!(remaining, "Just text.\n");
    }

    #[test]
    fn test_thematic_break_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let content = "---\ntitle: T\nlayout: custom\ntags: [a, b]\n---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("T"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_parse_date_utc() {
        let fm = FrontMatter {
            date: Some("2020-01-02".to_string()),
            ..Default::default()
        };

        let dt = fm.parse_date(None).unwrap();
        assert_eq!(dt.to_rfc3339(), "2020-01-02T00:00:00+00:00");
    }

    #[test]
    fn test_parse_date_in_timezone() {
        let fm = FrontMatter {
            date: Some("2020-07-01 12:00:00".to_string()),
            ..Default::default()
        };

        let dt = fm.parse_date(Some(chrono_tz::Europe::London)).unwrap();
        assert_eq!(dt.to_rfc3339(), "2020-07-01T12:00:00+01:00");
    }

    #[test]
    fn test_parse_date_rfc3339_and_garbage() {
        let fm = FrontMatter {
            date: Some("2019-05-04T10:00:00.000Z".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_date(None).is_some());

        let fm = FrontMatter {
            date: Some("last tuesday".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_date(None).is_none());
    }
}
