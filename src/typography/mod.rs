//! Typography - vertical rhythm and modular scale
//!
//! Sizes are derived from a base font size, a base line height and a scale
//! ratio. `rhythm` measures vertical space in multiples of the base line
//! height; `scale` picks a font size on the modular scale together with a
//! line height that keeps text on the half-line grid.

use std::fmt::{self, Write};

use crate::config::TypographyConfig;

/// Minimum space, in pixels, kept above and below a line of text
const MIN_LINE_PADDING: f64 = 2.0;

/// A font size with its matching line height
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    pub font_size: String,
    pub line_height: String,
}

impl Scale {
    fn css(&self) -> String {
        format!(
            "font-size: {}; line-height: {};",
            self.font_size, self.line_height
        )
    }
}

/// Typography theme built from the site configuration
pub struct Typography {
    config: TypographyConfig,
}

impl Typography {
    pub fn new(config: &TypographyConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn line_height_px(&self) -> f64 {
        self.config.base_font_size * self.config.base_line_height
    }

    /// Vertical space of `lines` base lines, in rem
    pub fn rhythm(&self, lines: f64) -> String {
        format!("{}rem", number(lines * self.config.base_line_height))
    }

    /// Font size `step` steps up (or down) the modular scale
    pub fn scale(&self, step: f64) -> Scale {
        let ratio = self.config.scale_ratio.powf(step);
        let font_px = self.config.base_font_size * ratio;
        let line_px = self.line_height_px();

        let mut lines = (2.0 * font_px / line_px).ceil() / 2.0;
        if lines * line_px - font_px < MIN_LINE_PADDING * 2.0 {
            lines += 0.5;
        }

        Scale {
            font_size: format!("{}rem", number(ratio)),
            line_height: number(lines * line_px / font_px),
        }
    }

    /// Google Fonts stylesheet URL, if any fonts are configured
    pub fn google_fonts_url(&self) -> Option<String> {
        if self.config.google_fonts.is_empty() {
            return None;
        }

        let families = self
            .config
            .google_fonts
            .iter()
            .map(|font| format!("{}:{}", font.name.replace(' ', "+"), font.styles.join(",")))
            .collect::<Vec<_>>()
            .join("|");

        Some(format!("https://fonts.googleapis.com/css?family={}", families))
    }

    /// Site stylesheet
    pub fn stylesheet(&self) -> Result<String, fmt::Error> {
        let c = &self.config;
        let header_font = font_stack(&c.header_font_family);
        let body_font = font_stack(&c.body_font_family);
        let mut css = String::new();

        writeln!(
            css,
            "html {{ font: {}%/{} {}; box-sizing: border-box; overflow-y: scroll; }}",
            number(c.base_font_size / 16.0 * 100.0),
            number(c.base_line_height),
            body_font
        )?;
        writeln!(css, "*, *:before, *:after {{ box-sizing: inherit; }}")?;
        writeln!(
            css,
            "body {{ color: {}; font-family: {}; font-weight: {}; word-wrap: break-word; font-kerning: normal; margin: 0; }}",
            c.body_color, body_font, c.body_weight
        )?;
        writeln!(
            css,
            "b, strong, dt, th {{ font-weight: {}; }}",
            c.bold_weight
        )?;
        writeln!(
            css,
            "p, ul, ol, pre, table, blockquote, figure, hr {{ margin: 0 0 {} 0; padding: 0; }}",
            self.rhythm(1.0)
        )?;
        writeln!(
            css,
            "ul, ol {{ margin-left: {}; }}",
            self.rhythm(1.0)
        )?;
        writeln!(
            css,
            "h1, h2, h3, h4, h5, h6 {{ color: {}; font-family: {}; font-weight: {}; text-rendering: optimizeLegibility; margin: {} 0 {} 0; }}",
            c.header_color,
            header_font,
            c.header_weight,
            self.rhythm(1.5),
            self.rhythm(1.0)
        )?;

        for (level, step) in [(1, 1.0), (2, 0.6), (3, 0.4), (4, 0.0), (5, -0.2), (6, -0.3)] {
            writeln!(css, "h{} {{ {} }}", level, self.scale(step).css())?;
        }

        writeln!(css, "h3 {{ margin-bottom: {}; }}", self.rhythm(0.25))?;
        writeln!(
            css,
            "h1 > a, h2 > a, h3 > a {{ color: inherit; text-decoration: none; }}"
        )?;
        writeln!(
            css,
            "h1 > a:hover, h2 > a:hover, h3 > a:hover {{ text-decoration: underline; }}"
        )?;
        writeln!(css, "a {{ color: {}; }}", c.link_color)?;
        writeln!(css, "a:hover, a:active {{ color: {}; }}", c.body_color)?;
        writeln!(
            css,
            "blockquote {{ {} padding-left: {}; margin-left: 0; border-left: {} solid {}; }}",
            self.scale(0.2).css(),
            self.rhythm(13.0 / 16.0),
            self.rhythm(3.0 / 16.0),
            c.blockquote_color
        )?;
        writeln!(
            css,
            "hr {{ background: hsla(0,0%,0%,0.2); border: none; height: 1px; margin-bottom: {}; }}",
            self.rhythm(1.0)
        )?;
        writeln!(
            css,
            "code, kbd, pre, samp {{ font-family: Menlo, Monaco, Consolas, \"Courier New\", monospace; }}"
        )?;
        writeln!(
            css,
            "pre {{ overflow: auto; padding: {}; background: hsla(0,0%,0%,0.04); border-radius: 3px; }}",
            self.rhythm(0.5)
        )?;
        writeln!(
            css,
            ".line-numbers {{ position: relative; padding-left: {}; }}",
            self.rhythm(2.0)
        )?;
        writeln!(
            css,
            ".line-numbers-rows {{ position: absolute; left: 0; width: {}; text-align: right; opacity: 0.5; white-space: pre; }}",
            self.rhythm(1.5)
        )?;

        // Layout shell
        writeln!(
            css,
            ".content {{ margin-left: auto; margin-right: auto; max-width: {}; padding: {} {}; }}",
            self.rhythm(24.0),
            self.rhythm(1.5),
            self.rhythm(0.75)
        )?;
        writeln!(
            css,
            ".brand-title {{ {} margin-bottom: {}; margin-top: 0; color: #000; }}",
            self.scale(1.5).css(),
            self.rhythm(1.0)
        )?;
        writeln!(css, ".brand-title-on-post {{ margin-top: 0; }}")?;
        writeln!(
            css,
            ".brand-title a, .brand-title-on-post a {{ color: inherit; text-decoration: none; }}"
        )?;

        // Post page
        writeln!(
            css,
            ".post-date {{ {} display: block; margin-bottom: {}; margin-top: {}; }}",
            self.scale(-0.2).css(),
            self.rhythm(1.0),
            self.rhythm(-1.0)
        )?;
        writeln!(
            css,
            ".post-nav {{ display: flex; flex-wrap: wrap; justify-content: space-between; list-style: none; padding: 0; margin-left: 0; }}"
        )?;
        writeln!(
            css,
            ".bio {{ display: flex; margin-bottom: {}; }}",
            self.rhythm(2.5)
        )?;

        Ok(css)
    }
}

fn font_stack(families: &[String]) -> String {
    families
        .iter()
        .map(|f| {
            if f.contains(' ') {
                format!("'{}'", f)
            } else {
                f.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a CSS number with at most four decimals and no trailing zeros
fn number(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typography() -> Typography {
        Typography::new(&TypographyConfig::default())
    }

    #[test]
    fn test_rhythm() {
        let t = typography();
        assert_eq!(t.rhythm(1.0), "1.75rem");
        assert_eq!(t.rhythm(24.0), "42rem");
        assert_eq!(t.rhythm(0.75), "1.3125rem");
        assert_eq!(t.rhythm(-1.0), "-1.75rem");
    }

    #[test]
    fn test_scale() {
        let t = typography();
        assert_eq!(
            t.scale(0.0),
            Scale {
                font_size: "1rem".to_string(),
                line_height: "1.75".to_string(),
            }
        );
        assert_eq!(
            t.scale(1.0),
            Scale {
                font_size: "2rem".to_string(),
                line_height: "1.3125".to_string(),
            }
        );
    }

    #[test]
    fn test_google_fonts_url() {
        assert_eq!(
            typography().google_fonts_url().as_deref(),
            Some("https://fonts.googleapis.com/css?family=Lora:400,300,400i,300i,700|Merriweather:400,700")
        );
    }

    #[test]
    fn test_stylesheet_contains_overrides() {
        let css = typography().stylesheet().unwrap();
        assert!(css.contains("a { color: #d65947; }"));
        assert!(css.contains("solid #fca206"));
        assert!(css.contains("max-width: 42rem"));
        assert!(css.contains("font-family: Merriweather,'Helvetica Neue',Helvetica,Arial,sans-serif"));
    }

    #[test]
    fn test_number() {
        assert_eq!(number(1.0), "1");
        assert_eq!(number(1.3125), "1.3125");
        assert_eq!(number(0.0), "0");
    }
}
