//! Route parameter and path decoration handling.
//!
//! Route files carry framework decorations that never appear in URLs:
//! rest-parameter brackets (`[...1]intro.md`), recursive catch-all
//! directories (`[...2api_deep]`) and layout-name suffixes
//! (`index@docs.md`). The helpers here map between decorated file paths
//! and the clean slugs used by requests.

use std::path::Path;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::utils::path::extname;

/// `[...param]` rest-parameter decoration.
pub static REST_PARAMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\.\.\.(.*?)\]").unwrap());

/// `[...name_deep]` recursive catch-all marker.
pub static DEEP_MATCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\.\.\..*?_deep\]").unwrap());

/// `@layout-name` suffix trailing a filename.
pub static LAYOUT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@.+").unwrap());

/// Decode a route parameter to a slug: underscores become path
/// separators, a trailing `.html` suffix is stripped.
///
/// # Examples
/// ```
/// use docroute::routes::param_to_slug;
/// assert_eq!(param_to_slug("docs_getting-started"), "docs/getting-started");
/// assert_eq!(param_to_slug("docs_intro.html"), "docs/intro");
/// ```
pub fn param_to_slug(param: &str) -> String {
    let slug = param.replace('_', "/");
    match slug.strip_suffix(".html") {
        Some(stripped) => stripped.to_string(),
        None => slug,
    }
}

/// Decode a route parameter to a directory path (same convention).
pub fn param_to_dir(param: &str) -> String {
    param_to_slug(param)
}

/// Map a file path to a clean path relative to the routes root.
///
/// Absolute paths are made relative to `routes_dir`; rest-parameter
/// brackets are removed and a layout-name suffix is replaced with the
/// file's original extension. Idempotent.
///
/// ```text
/// src/routes/docs/[...1]getting-started/[...1]intro@docs.md
///     -> docs/getting-started/intro.md
/// ```
pub fn clean_file_path(file_path: &Path, routes_dir: &Path) -> String {
    let relative = if file_path.is_absolute() {
        file_path.strip_prefix(routes_dir).unwrap_or(file_path)
    } else {
        file_path
    };
    let relative = relative.to_string_lossy();
    let original = file_path.to_string_lossy();
    let ext = extname(&original).to_string();

    let stripped = REST_PARAMS_RE.replace_all(&relative, "");
    LAYOUT_NAME_RE
        .replace_all(&stripped, NoExpand(&ext))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_param_to_slug() {
        assert_eq!(param_to_slug("a_b_c"), "a/b/c");
        assert_eq!(param_to_slug("a_b.html"), "a/b");
        assert_eq!(param_to_slug("index"), "index");
    }

    #[test]
    fn test_clean_file_path_strips_decorations() {
        let routes = Path::new("/project/src/routes");
        let file = PathBuf::from("/project/src/routes/docs/[...1]getting-started/[...2]intro.md");
        assert_eq!(
            clean_file_path(&file, routes),
            "docs/getting-started/intro.md"
        );
    }

    #[test]
    fn test_clean_file_path_layout_suffix() {
        let routes = Path::new("/project/src/routes");
        let file = PathBuf::from("/project/src/routes/docs/index@docs.md");
        assert_eq!(clean_file_path(&file, routes), "docs/index.md");
    }

    #[test]
    fn test_clean_file_path_relative_input() {
        let routes = Path::new("/project/src/routes");
        let file = PathBuf::from("docs/[...1]intro.md");
        assert_eq!(clean_file_path(&file, routes), "docs/intro.md");
    }

    #[test]
    fn test_clean_file_path_deep_segment_leaves_empty_dir() {
        let routes = Path::new("/project/src/routes");
        let file = PathBuf::from("/project/src/routes/docs/[...5components_deep]/index.md");
        assert_eq!(clean_file_path(&file, routes), "docs//index.md");
    }

    #[test]
    fn test_clean_file_path_idempotent() {
        let routes = Path::new("/project/src/routes");
        let file = PathBuf::from("/project/src/routes/docs/[...1]guide/index@docs.md");
        let once = clean_file_path(&file, routes);
        let twice = clean_file_path(Path::new(&once), routes);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_deep_match_pattern() {
        assert!(DEEP_MATCH_RE.is_match("docs/[...5components_deep]/index.md"));
        assert!(!DEEP_MATCH_RE.is_match("docs/[...5components]/index.md"));
    }
}
