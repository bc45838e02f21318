//! Frontmatter extraction: YAML (`---`) and TOML (`+++`) blocks.

use super::JsonMap;

/// Split leading frontmatter from a markdown source.
///
/// Returns the parsed key-value map and the remaining body, or `None` when
/// the content has no (or unparseable) frontmatter block. Malformed
/// frontmatter is treated as absent rather than as an error.
pub fn extract(content: &str) -> Option<(JsonMap, &str)> {
    let (raw, body, is_toml) = detect(content)?;
    let meta = if is_toml {
        parse_toml(raw)?
    } else {
        parse_yaml(raw)?
    };
    Some((meta, body))
}

/// Frontmatter map of a file, or an empty map when there is none.
pub fn get_frontmatter(content: &str) -> JsonMap {
    extract(content).map(|(meta, _)| meta).unwrap_or_default()
}

/// Locate a frontmatter block: an opening delimiter line at the very start
/// and a matching closing delimiter on its own line.
fn detect(content: &str) -> Option<(&str, &str, bool)> {
    let is_toml = if content.starts_with("---") {
        false
    } else if content.starts_with("+++") {
        true
    } else {
        return None;
    };

    let delim = if is_toml { "+++" } else { "---" };
    let rest = &content[3..];
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    let rest = rest.strip_prefix('\n')?;

    let close = format!("\n{delim}");
    let mut search = 0;
    while let Some(pos) = rest[search..].find(&close) {
        let at = search + pos;
        let after = &rest[at + close.len()..];
        let (line_rest, body) = match after.find('\n') {
            Some(nl) => (&after[..nl], &after[nl + 1..]),
            None => (after, ""),
        };
        if line_rest.trim().is_empty() {
            return Some((&rest[..at], body, is_toml));
        }
        search = at + 1;
    }
    None
}

fn parse_yaml(raw: &str) -> Option<JsonMap> {
    let value: serde_json::Value = serde_yaml::from_str(raw).ok()?;
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

fn parse_toml(raw: &str) -> Option<JsonMap> {
    let value: toml::Value = toml::from_str(raw).ok()?;
    match serde_json::to_value(value).ok()? {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ntags:\n  - a\n  - b\n---\n\n# Body\n";
        let (meta, body) = extract(content).unwrap();

        assert_eq!(meta.get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert_eq!(
            meta.get("tags").and_then(|v| v.as_array()).map(Vec::len),
            Some(2)
        );
        assert!(body.starts_with("\n# Body"));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ndraft = true\n+++\n# Body\n";
        let (meta, body) = extract(content).unwrap();

        assert_eq!(meta.get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert_eq!(meta.get("draft").and_then(|v| v.as_bool()), Some(true));
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(extract("# Just content\n").is_none());
        assert!(get_frontmatter("# Just content\n").is_empty());
    }

    #[test]
    fn test_unterminated_frontmatter() {
        assert!(extract("---\ntitle: Hello\n").is_none());
    }

    #[test]
    fn test_closing_delimiter_without_trailing_newline() {
        let (meta, body) = extract("---\ntitle: Hello\n---").unwrap();
        assert_eq!(meta.get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert!(body.is_empty());
    }

    #[test]
    fn test_delimiter_with_trailing_text_is_not_closing() {
        // A `+++ trailing` line does not terminate the block.
        let content = "+++\ntitle = \"Hello\"\ns = '''\n+++ not a close\n'''\n+++\n";
        let (meta, body) = extract(content).unwrap();
        assert_eq!(meta.get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert!(body.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_absent() {
        assert!(extract("---\n[unclosed\n---\n").is_none());
    }
}
