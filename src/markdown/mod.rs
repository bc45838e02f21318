//! Markdown parsing: frontmatter, title and heading extraction.
//!
//! The parser is deliberately lightweight. It never renders HTML; it walks
//! the `pulldown-cmark` event stream once to collect the data the meta and
//! sidebar endpoints need (title, heading outline, frontmatter map).

pub mod frontmatter;

use std::sync::OnceLock;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

pub use frontmatter::get_frontmatter;

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// A document heading with its anchor id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub title: String,
    pub id: String,
}

/// Result of parsing a markdown source file.
///
/// Transforms receive this mutably and may attach computed fields
/// (typically extra keys in `frontmatter`) before the result is returned
/// to the requester.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedMarkdown {
    /// Page title: frontmatter `title`, falling back to the first `#` heading.
    pub title: Option<String>,
    /// Frontmatter key-value map (untyped, insertion-ordered).
    pub frontmatter: JsonMap,
    /// Heading outline in document order.
    pub headings: Vec<Heading>,
}

/// Markdown parser with a fixed option set.
pub struct MarkdownParser {
    options: Options,
}

impl MarkdownParser {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }

    /// Parse a markdown source: split off frontmatter, collect headings.
    pub fn parse(&self, content: &str) -> ParsedMarkdown {
        let (frontmatter, body) = match frontmatter::extract(content) {
            Some((meta, body)) => (meta, body),
            None => (JsonMap::new(), content),
        };

        let mut headings = Vec::new();
        let mut in_heading = false;
        let mut current_level = 0u8;
        let mut current_text = String::new();

        for event in Parser::new_ext(body, self.options) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    in_heading = true;
                    current_level = level as u8;
                    current_text.clear();
                }
                Event::End(TagEnd::Heading(..)) => {
                    in_heading = false;
                    let title = current_text.trim().to_string();
                    if !title.is_empty() {
                        let id = github_slug(&title);
                        headings.push(Heading {
                            level: current_level,
                            title,
                            id,
                        });
                    }
                }
                Event::Text(text) | Event::Code(text) if in_heading => {
                    current_text.push_str(&text);
                }
                _ => {}
            }
        }

        let title = frontmatter
            .get("title")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| {
                headings
                    .iter()
                    .find(|h| h.level == 1)
                    .map(|h| h.title.clone())
            });

        ParsedMarkdown {
            title,
            frontmatter,
            headings,
        }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide parser, initialized exactly once on first use and reused
/// across requests.
pub fn shared_parser() -> &'static MarkdownParser {
    static PARSER: OnceLock<MarkdownParser> = OnceLock::new();
    PARSER.get_or_init(MarkdownParser::new)
}

/// GitHub-style anchor id: lowercase, spaces to hyphens, punctuation dropped.
fn github_slug(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headings() {
        let parser = MarkdownParser::new();
        let result = parser.parse("# Intro\n\ntext\n\n## Getting Started\n");

        assert_eq!(result.title.as_deref(), Some("Intro"));
        assert_eq!(result.headings.len(), 2);
        assert_eq!(result.headings[0].level, 1);
        assert_eq!(result.headings[1].title, "Getting Started");
        assert_eq!(result.headings[1].id, "getting-started");
    }

    #[test]
    fn test_frontmatter_title_wins() {
        let parser = MarkdownParser::new();
        let result = parser.parse("---\ntitle: From Frontmatter\n---\n\n# From Heading\n");

        assert_eq!(result.title.as_deref(), Some("From Frontmatter"));
        assert_eq!(
            result.frontmatter.get("title").and_then(|v| v.as_str()),
            Some("From Frontmatter")
        );
    }

    #[test]
    fn test_code_in_heading() {
        let parser = MarkdownParser::new();
        let result = parser.parse("## The `resolve` helper\n");

        assert_eq!(result.headings[0].title, "The resolve helper");
        assert_eq!(result.headings[0].id, "the-resolve-helper");
    }

    #[test]
    fn test_no_headings() {
        let parser = MarkdownParser::new();
        let result = parser.parse("plain paragraph\n");

        assert!(result.title.is_none());
        assert!(result.headings.is_empty());
    }

    #[test]
    fn test_shared_parser_is_singleton() {
        let a = shared_parser() as *const MarkdownParser;
        let b = shared_parser() as *const MarkdownParser;
        assert_eq!(a, b);
    }

    #[test]
    fn test_github_slug() {
        assert_eq!(github_slug("Getting Started"), "getting-started");
        assert_eq!(github_slug("What's New?"), "whats-new");
    }
}
