//! Slug to route file resolution.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern, glob_with};

use super::path::{LAYOUT_NAME_RE, REST_PARAMS_RE};
use crate::utils::path::{extname, remove_first};

/// Extensions a slug may resolve to. Only `.md` matches survive
/// validation; `.svelte` files occupy the slug and make it unresolvable.
pub(crate) const CONTENT_EXTENSIONS: [&str; 2] = ["md", "svelte"];

/// Resolve a slug to a file in the routes directory.
///
/// The match patterns tolerate route decorations: every directory segment
/// is matched by suffix (`*docs` matches `[...1]docs`) and the filename by
/// substring. A direct file match is tried first, then an index file
/// inside a directory named like the slug's last segment. The first match
/// in sorted order is validated by re-deriving its slug and requiring
/// exact equality with the input.
///
/// Absence is a normal outcome: returns `None` on no match or failed
/// validation.
pub fn resolve_slug(slug: &str, routes_dir: &Path) -> Option<PathBuf> {
    if slug.is_empty() {
        return None;
    }

    let root = Pattern::escape(routes_dir.to_str()?);
    let mut segments: Vec<&str> = slug.split('/').collect();
    let last = segments.pop()?;

    let mut base = root;
    for segment in &segments {
        base.push_str("/*");
        base.push_str(segment);
    }

    let direct: Vec<String> = CONTENT_EXTENSIONS
        .iter()
        .map(|ext| format!("{base}/*{last}*.{ext}"))
        .collect();
    let file = glob_first(&direct).or_else(|| {
        let index: Vec<String> = CONTENT_EXTENSIONS
            .iter()
            .map(|ext| format!("{base}/*{last}/*index*.{ext}"))
            .collect();
        glob_first(&index)
    })?;

    let relative = file.strip_prefix(routes_dir).ok()?;
    let relative = relative.to_string_lossy();

    let matched = REST_PARAMS_RE.replace_all(&relative, "");
    let matched = LAYOUT_NAME_RE.replace_all(&matched, "");
    let matched = remove_first(&matched, extname(&relative));
    let matched = if slug == "index" {
        matched.as_str()
    } else {
        matched.strip_suffix("/index").unwrap_or(&matched)
    };

    let is_markdown = file.extension().is_some_and(|ext| ext == "md");
    (matched == slug && is_markdown).then_some(file)
}

/// First filesystem match across patterns, in sorted order.
///
/// Dotfiles require a literal leading dot so hidden files never match a
/// wildcard.
pub(crate) fn glob_first(patterns: &[String]) -> Option<PathBuf> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: true,
    };

    let mut matches: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        if let Ok(paths) = glob_with(pattern, options) {
            matches.extend(paths.filter_map(Result::ok));
        }
    }
    matches.sort();
    matches.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn routes_tree(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for file in files {
            let path = tmp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "# stub\n").unwrap();
        }
        tmp
    }

    #[test]
    fn test_resolve_direct_and_index() {
        let tmp = routes_tree(&["docs/index.md", "docs/getting-started.md"]);
        let routes = tmp.path();

        let direct = resolve_slug("docs/getting-started", routes).unwrap();
        assert!(direct.ends_with("docs/getting-started.md"));

        let index = resolve_slug("docs", routes).unwrap();
        assert!(index.ends_with("docs/index.md"));

        assert!(resolve_slug("docs/missing", routes).is_none());
    }

    #[test]
    fn test_resolve_decorated_paths() {
        let tmp = routes_tree(&["docs/[...1]getting-started/[...1]intro.md"]);
        let routes = tmp.path();

        let file = resolve_slug("docs/getting-started/intro", routes).unwrap();
        assert!(file.ends_with("docs/[...1]getting-started/[...1]intro.md"));
    }

    #[test]
    fn test_resolve_layout_suffix() {
        let tmp = routes_tree(&["docs/index@docs.md"]);
        let file = resolve_slug("docs", tmp.path()).unwrap();
        assert!(file.ends_with("docs/index@docs.md"));
    }

    #[test]
    fn test_resolve_rejects_non_markdown() {
        let tmp = routes_tree(&["docs/widget.svelte"]);
        assert!(resolve_slug("docs/widget", tmp.path()).is_none());
    }

    #[test]
    fn test_resolve_rejects_slug_mismatch() {
        // `*intro*` would glob `reintroduction.md`, but the re-derived slug
        // differs from the request.
        let tmp = routes_tree(&["docs/reintroduction.md"]);
        assert!(resolve_slug("docs/intro", tmp.path()).is_none());
    }

    #[test]
    fn test_resolve_empty_slug() {
        let tmp = routes_tree(&["index.md"]);
        assert!(resolve_slug("", tmp.path()).is_none());
    }

    #[test]
    fn test_resolve_root_index() {
        let tmp = routes_tree(&["index.md"]);
        let file = resolve_slug("index", tmp.path()).unwrap();
        assert!(file.ends_with("index.md"));
    }
}
