//! Markdown rendering with syntax highlighting

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::{Captures, Regex};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::config::MarkdownConfig;
use crate::helpers::html_escape;

lazy_static! {
    static ref IFRAME: Regex = Regex::new(r"(?s)<iframe\b[^>]*>.*?</iframe>").unwrap();
    static ref IFRAME_WIDTH: Regex = Regex::new(r#"\bwidth=["']?(\d+)"#).unwrap();
    static ref IFRAME_HEIGHT: Regex = Regex::new(r#"\bheight=["']?(\d+)"#).unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Output of rendering one Markdown document
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub html: String,
    /// Plain text of the document, used for excerpts
    pub text: String,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    config: MarkdownConfig,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new(config: &MarkdownConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            config: config.clone(),
        }
    }

    /// Render markdown to HTML and plain text
    pub fn render(&self, markdown: &str) -> Result<Rendered> {
        self.render_with(markdown, |src| src.to_string())
    }

    /// Render markdown, passing every image source through `image_src`
    pub fn render_with(
        &self,
        markdown: &str,
        image_src: impl Fn(&str) -> String,
    ) -> Result<Rendered> {
        // Front-matter is stripped beforehand, so no YAML metadata blocks here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut text = String::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut image: Option<(String, String, String)> = None;

        for event in parser {
            if let Some((lang, content)) = code_block.as_mut() {
                match event {
                    Event::Text(t) => content.push_str(&t),
                    Event::End(TagEnd::CodeBlock) => {
                        text.push_str(content);
                        text.push(' ');
                        let highlighted = self.highlight_code(content, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        code_block = None;
                    }
                    _ => {}
                }
                continue;
            }

            if let Some((_, _, alt)) = image.as_mut() {
                match event {
                    Event::Text(t) | Event::Code(t) => alt.push_str(&t),
                    Event::End(TagEnd::Image) => {
                        if let Some((src, title, alt)) = image.take() {
                            events.push(Event::Html(CowStr::from(self.image_tag(
                                &src, &title, &alt,
                            ))));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            let lang = lang.split_whitespace().next().unwrap_or("").to_string();
                            (!lang.is_empty()).then_some(lang)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    image = Some((image_src(&dest_url), title.to_string(), String::new()));
                }
                Event::Code(code) => {
                    text.push_str(&code);
                    events.push(Event::Html(CowStr::from(self.inline_code(&code))));
                }
                Event::Text(t) => {
                    text.push_str(&t);
                    events.push(Event::Text(t));
                }
                Event::SoftBreak | Event::HardBreak => {
                    text.push(' ');
                    events.push(event);
                }
                Event::End(TagEnd::Paragraph)
                | Event::End(TagEnd::Heading(_))
                | Event::End(TagEnd::Item) => {
                    text.push(' ');
                    events.push(event);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(Rendered {
            html: self.wrap_iframes(&html_output),
            text: WHITESPACE.replace_all(text.trim(), " ").into_owned(),
        })
    }

    fn theme(&self) -> Result<&Theme> {
        self.theme_set
            .themes
            .get(&self.config.highlight_theme)
            .or_else(|| self.theme_set.themes.values().next())
            .ok_or_else(|| anyhow!("No highlighting themes available"))
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let class = format!("{}{}", self.config.class_prefix, lang);

        let lines = match self.highlight_lines(code, lang) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::debug!("Falling back to plain code block for {}: {}", lang, e);
                code.lines().map(html_escape).collect()
            }
        };

        if self.config.line_numbers {
            let gutter: String = (1..=lines.len())
                .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                r#"<div class="highlight" data-language="{lang}"><pre class="{class} line-numbers"><span class="line-numbers-rows">{gutter}</span><code class="{class}">{code}</code></pre></div>"#,
                lang = lang,
                class = class,
                gutter = gutter,
                code = lines.join("\n"),
            )
        } else {
            format!(
                r#"<div class="highlight" data-language="{lang}"><pre class="{class}"><code class="{class}">{code}</code></pre></div>"#,
                lang = lang,
                class = class,
                code = lines.join("\n"),
            )
        }
    }

    /// Highlight code into one HTML fragment per source line
    fn highlight_lines(&self, code: &str, lang: &str) -> Result<Vec<String>> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, self.theme()?);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &self.syntax_set)?;
            let html = styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)?;
            lines.push(html.trim_end_matches(['\n', '\r']).to_string());
        }
        Ok(lines)
    }

    /// Render inline code, honoring the `lang>code` marker
    fn inline_code(&self, code: &str) -> String {
        if let Some(marker) = self.config.inline_code_marker.as_deref() {
            if let Some((lang, rest)) = code.split_once(marker) {
                if !lang.is_empty()
                    && lang
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
                {
                    return format!(
                        r#"<code class="{}{}">{}</code>"#,
                        self.config.class_prefix,
                        lang,
                        html_escape(rest)
                    );
                }
            }
        }
        format!("<code>{}</code>", html_escape(code))
    }

    fn image_tag(&self, src: &str, title: &str, alt: &str) -> String {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, html_escape(title))
        };
        format!(
            r#"<img src="{}" alt="{}"{} loading="lazy" style="max-width: {}px; width: 100%;">"#,
            html_escape(src),
            html_escape(alt),
            title_attr,
            self.config.image_max_width
        )
    }

    /// Wrap embedded iframes so they keep their aspect ratio
    fn wrap_iframes(&self, html: &str) -> String {
        IFRAME
            .replace_all(html, |caps: &Captures| {
                let iframe = &caps[0];
                let dimension = |re: &Regex| {
                    re.captures(iframe)
                        .and_then(|c| c[1].parse::<f64>().ok())
                        .filter(|v| *v > 0.0)
                };
                match (dimension(&IFRAME_WIDTH), dimension(&IFRAME_HEIGHT)) {
                    (Some(width), Some(height)) => format!(
                        r#"<div class="responsive-iframe" style="padding-bottom: {:.2}%; position: relative; height: 0; overflow: hidden; {}">{}</div>"#,
                        height / width * 100.0,
                        self.config.iframe_wrapper_style,
                        iframe.replacen(
                            "<iframe",
                            r#"<iframe style="position: absolute; top: 0; left: 0; width: 100%; height: 100%;""#,
                            1
                        )
                    ),
                    _ => format!(
                        r#"<div class="responsive-iframe" style="{}">{}</div>"#,
                        self.config.iframe_wrapper_style, iframe
                    ),
                }
            })
            .into_owned()
    }
}

/// Shorten plain text to at most `length` characters on a word boundary
pub fn prune(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }

    let head: String = text.chars().take(length + 1).collect();
    let cut = match head.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &head[..pos],
        _ => {
            let end = head
                .char_indices()
                .nth(length)
                .map(|(i, _)| i)
                .unwrap_or(head.len());
            &head[..end]
        }
    };

    let cut = cut.trim_end_matches(|c: char| !c.is_alphanumeric());
    format!("{}…", cut)
}
