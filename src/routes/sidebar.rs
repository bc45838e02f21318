//! Sidebar tree building.
//!
//! Walks a routes subtree and groups its files into an ordered map of
//! category name to links. Category and title defaults are derived from
//! the cleaned file path and frontmatter; every default can be overridden
//! by a caller-supplied resolver that still has access to the default via
//! [`SidebarItem::resolve`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use glob::Pattern;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::path::{DEEP_MATCH_RE, clean_file_path, param_to_dir};
use super::resolve::{CONTENT_EXTENSIONS, glob_first};
use super::{FileFilter, RouteError, read_dir_deep, sort_ordered_files};
use crate::markdown::{JsonMap, get_frontmatter};
use crate::utils::path::{basename, dirname, extname, remove_first};
use crate::utils::string::kebab_to_title_case;

/// First ATX heading in a document; capture 1 is the heading text.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\s(.*?)($|\n|\r)").unwrap());

/// Category for links that sit directly at the requested root.
pub const ROOT_CATEGORY: &str = ".";

/// A single sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SidebarLink {
    pub title: String,
    pub slug: String,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_kind: Option<MatchKind>,
}

/// How a link matches the current page path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The link stays active for every path below its slug.
    Deep,
}

/// Category name to links, preserving first-seen category order.
#[derive(Debug, Default, Clone)]
pub struct CategoryLinks {
    entries: Vec<(String, Vec<SidebarLink>)>,
}

impl CategoryLinks {
    /// Get or create a category, keeping its position stable.
    pub fn ensure(&mut self, category: &str) -> &mut Vec<SidebarLink> {
        let index = match self.entries.iter().position(|(name, _)| name == category) {
            Some(index) => index,
            None => {
                self.entries.push((category.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    pub fn push(&mut self, category: &str, link: SidebarLink) {
        self.ensure(category).push(link);
    }

    pub fn remove(&mut self, category: &str) {
        self.entries.retain(|(name, _)| name != category);
    }

    pub fn get(&self, category: &str) -> Option<&[SidebarLink]> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, links)| links.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CategoryLinks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, links) in &self.entries {
            map.serialize_entry(category, links)?;
        }
        map.end()
    }
}

/// Sidebar response body.
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct Sidebar {
    pub links: CategoryLinks,
}

/// Data handed to sidebar metadata resolvers, one file at a time.
pub struct SidebarItem<'a> {
    pub file_path: &'a Path,
    pub relative_path: &'a str,
    pub clean_path: &'a str,
    pub dirname: &'a Path,
    pub clean_dirname: &'a str,
    pub frontmatter: &'a JsonMap,
    pub content: &'a str,
    default: &'a dyn Fn() -> String,
}

impl SidebarItem<'_> {
    /// Default resolution for the field this resolver is overriding.
    pub fn resolve(&self) -> String {
        (self.default)()
    }
}

/// Overrides one sidebar field; `None` falls back to the default.
pub type SidebarResolver<'a> = &'a (dyn Fn(&SidebarItem<'_>) -> Option<String> + Sync);

/// Formats a raw category directory name; receives the default formatter
/// as a helper.
pub type CategoryFormatter<'a> = &'a (dyn Fn(&str, &dyn Fn(&str) -> String) -> String + Sync);

#[derive(Default)]
pub struct SidebarRequestOptions<'a> {
    pub filter: Option<&'a FileFilter>,
    pub resolve_title: Option<SidebarResolver<'a>>,
    pub resolve_category: Option<SidebarResolver<'a>>,
    pub resolve_slug: Option<SidebarResolver<'a>>,
    pub format_category_name: Option<CategoryFormatter<'a>>,
}

/// Build the sidebar for a directory parameter.
///
/// Files are visited in explicit order (see [`sort_ordered_files`]).
/// Skipped entirely: hidden files (`_`/`.` prefix), the index file of the
/// routes root, recursive catch-all files that are not the catch-all
/// directory's own index, and anything the filter rejects. The root
/// category is kept at the top of the map and dropped when it ends up
/// empty.
pub fn handle_sidebar_request(
    dir_param: &str,
    routes_dir: &Path,
    options: &SidebarRequestOptions<'_>,
) -> Result<Sidebar, RouteError> {
    let directory = param_to_dir(dir_param);
    let dir_path = routes_dir.join(&directory);
    if !dir_path.is_dir() {
        return Err(RouteError::NoMatchingDir { dir: directory });
    }

    let files = sort_ordered_files(read_dir_deep(&dir_path), routes_dir);
    let glob_root = Pattern::escape(&routes_dir.to_string_lossy());

    let mut links = CategoryLinks::default();

    // Root at top.
    links.ensure(ROOT_CATEGORY);
    let mut has_root = false;

    for file in files {
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative = file
            .strip_prefix(routes_dir)
            .unwrap_or(&file)
            .to_string_lossy()
            .into_owned();
        let dirs: Vec<&str> = dirname(&relative).split('/').collect();
        let clean_path = clean_file_path(&file, routes_dir);
        let clean_dirname = dirname(&clean_path).to_string();
        let clean_dirs: Vec<&str> = clean_dirname.split('/').collect();
        let clean_dirs_reversed: Vec<&str> = clean_dirs.iter().rev().copied().collect();
        let is_index_file = clean_path.contains("/index.");
        let is_root = clean_dirs.len() == 1;

        let is_deep_match = DEEP_MATCH_RE.is_match(&relative);
        let mut is_valid_deep_match = false;
        if is_deep_match
            && let Some(deep_dir) = dirs.iter().position(|dir| DEEP_MATCH_RE.is_match(dir))
        {
            let found = glob_deep_index(&glob_root, &clean_dirs, deep_dir + 1)
                .or_else(|| glob_deep_index(&glob_root, &clean_dirs, deep_dir + 2));
            is_valid_deep_match = found.as_deref() == Some(file.as_path());
        }

        let hidden = file_name.starts_with('_') || file_name.starts_with('.');
        let filtered = options
            .filter
            .is_some_and(|filter| !filter.matches(&format!("/{clean_path}")));
        if hidden
            || (is_root && is_index_file)
            || (is_deep_match && !is_valid_deep_match)
            || filtered
        {
            continue;
        }

        let content = fs::read_to_string(&file).map_err(|source| RouteError::Read {
            path: file.clone(),
            source,
        })?;
        let frontmatter = get_frontmatter(&content);

        let format = |name: &str| kebab_to_title_case(name);
        let format_category = |name: &str| match options.format_category_name {
            Some(formatter) => formatter(name, &format),
            None => kebab_to_title_case(name),
        };

        let default_title = || -> String {
            frontmatter_str(&frontmatter, "sidebar_title")
                .or_else(|| frontmatter_str(&frontmatter, "title"))
                .map(str::to_string)
                .or_else(|| is_deep_match.then(|| format_category(clean_dirs_reversed[0])))
                .or_else(|| {
                    HEADING_RE
                        .captures(&content)
                        .and_then(|captures| captures.get(1))
                        .map(|heading| heading.as_str().to_string())
                })
                .unwrap_or_else(|| {
                    kebab_to_title_case(&remove_first(basename(&clean_path), extname(&clean_path)))
                })
        };

        let default_category = || -> String {
            if is_root {
                return ROOT_CATEGORY.to_string();
            }
            let depth = usize::from(is_index_file && is_deep_match);
            clean_dirs_reversed
                .get(depth)
                .map(|dir| (*dir).to_string())
                .unwrap_or_default()
        };

        let default_slug = || -> String {
            let path = remove_first(&clean_path, extname(&clean_path));
            let path = path.strip_suffix("/index").unwrap_or(&path);
            format!("/{path}")
        };

        let run = |resolver: Option<SidebarResolver<'_>>, default: &dyn Fn() -> String| {
            let item = SidebarItem {
                file_path: &file,
                relative_path: &relative,
                clean_path: &clean_path,
                dirname: file.parent().unwrap_or(Path::new("")),
                clean_dirname: &clean_dirname,
                frontmatter: &frontmatter,
                content: &content,
                default,
            };
            resolver
                .and_then(|resolve| resolve(&item))
                .unwrap_or_else(|| item.resolve())
        };

        let category = format_category(&run(options.resolve_category, &default_category));
        let title = run(options.resolve_title, &default_title);
        let slug = run(options.resolve_slug, &default_slug);
        let match_kind = is_deep_match.then_some(MatchKind::Deep);

        has_root = has_root || category == ROOT_CATEGORY;
        let link = SidebarLink {
            title,
            slug,
            match_kind,
        };
        links.push(&category, link);
    }

    if !has_root {
        links.remove(ROOT_CATEGORY);
    }

    Ok(Sidebar { links })
}

/// Glob for an index file at `depth` cleaned directory segments below the
/// routes root, tolerating route decorations on every segment.
fn glob_deep_index(glob_root: &str, clean_dirs: &[&str], depth: usize) -> Option<PathBuf> {
    let joined = clean_dirs[..depth.min(clean_dirs.len())].join("/*");
    let patterns: Vec<String> = CONTENT_EXTENSIONS
        .iter()
        .map(|ext| format!("{glob_root}/*{joined}/*index*.{ext}"))
        .collect();
    glob_first(&patterns)
}

fn frontmatter_str<'a>(frontmatter: &'a JsonMap, key: &str) -> Option<&'a str> {
    frontmatter.get(key).and_then(|value| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn routes_tree(files: &[(&str, &str)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for (file, content) in files {
            let path = tmp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
        }
        tmp
    }

    #[test]
    fn test_sidebar_groups_by_category() {
        let tmp = routes_tree(&[
            ("docs/index.md", "# Docs\n"),
            ("docs/guide/setup.md", "# Setup Guide\n"),
            ("docs/guide/usage.md", "# Usage\n"),
        ]);

        let sidebar = handle_sidebar_request("docs", tmp.path(), &Default::default()).unwrap();

        // The root index file is skipped and the empty root category
        // dropped.
        assert_eq!(sidebar.links.categories().collect::<Vec<_>>(), ["Guide"]);
        let guide = sidebar.links.get("Guide").unwrap();
        assert_eq!(guide[0].title, "Setup Guide");
        assert_eq!(guide[0].slug, "/docs/guide/setup");
        assert_eq!(guide[0].match_kind, None);
        assert_eq!(guide[1].title, "Usage");
    }

    #[test]
    fn test_sidebar_missing_dir_is_error() {
        let tmp = routes_tree(&[("docs/index.md", "# Docs\n")]);
        let err = handle_sidebar_request("missing", tmp.path(), &Default::default()).unwrap_err();
        assert!(matches!(err, RouteError::NoMatchingDir { dir } if dir == "missing"));
    }

    #[test]
    fn test_sidebar_title_priority() {
        let tmp = routes_tree(&[
            (
                "docs/guide/a.md",
                "---\ntitle: Title\nsidebar_title: Sidebar Title\n---\n\n# Heading\n",
            ),
            ("docs/guide/b.md", "---\ntitle: Title\n---\n\n# Heading\n"),
            ("docs/guide/c.md", "# Heading\n"),
            ("docs/guide/quick-start.md", "no heading here\n"),
        ]);

        let sidebar = handle_sidebar_request("docs", tmp.path(), &Default::default()).unwrap();
        let titles: Vec<&str> = sidebar.links.get("Guide").unwrap()
            .iter()
            .map(|link| link.title.as_str())
            .collect();
        assert_eq!(titles, ["Sidebar Title", "Title", "Heading", "Quick Start"]);
    }

    #[test]
    fn test_sidebar_deep_match() {
        let tmp = routes_tree(&[
            (
                "docs/[...5components_deep]/index.md",
                "---\ntitle: Components\n---\n\n# Components\n",
            ),
            ("docs/[...5components_deep]/button.md", "# Button\n"),
            ("docs/guide/setup.md", "# Setup\n"),
        ]);

        let sidebar = handle_sidebar_request("docs", tmp.path(), &Default::default()).unwrap();

        // Only the catch-all directory's own index survives, grouped under
        // the parent directory.
        let docs = sidebar.links.get("Docs").unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Components");
        assert_eq!(docs[0].slug, "/docs/");
        assert_eq!(docs[0].match_kind, Some(MatchKind::Deep));
        assert!(sidebar.links.get("Guide").is_some());
    }

    #[test]
    fn test_sidebar_explicit_order() {
        let tmp = routes_tree(&[
            ("guide/first.md", "# First\n"),
            ("guide/[...2]second.md", "# Second\n"),
            ("guide/[...1]start.md", "# Start\n"),
        ]);

        let sidebar = handle_sidebar_request("guide", tmp.path(), &Default::default()).unwrap();
        let titles: Vec<&str> = sidebar.links.get(ROOT_CATEGORY).unwrap()
            .iter()
            .map(|link| link.title.as_str())
            .collect();
        assert_eq!(titles, ["Start", "Second", "First"]);
    }

    #[test]
    fn test_sidebar_skips_hidden_files() {
        let tmp = routes_tree(&[
            ("docs/guide/_draft.md", "# Draft\n"),
            ("docs/guide/.notes.md", "# Notes\n"),
            ("docs/guide/setup.md", "# Setup\n"),
        ]);

        let sidebar = handle_sidebar_request("docs", tmp.path(), &Default::default()).unwrap();
        let guide = sidebar.links.get("Guide").unwrap();
        assert_eq!(guide.len(), 1);
        assert_eq!(guide[0].title, "Setup");
    }

    #[test]
    fn test_sidebar_filter() {
        let tmp = routes_tree(&[
            ("docs/guide/setup.md", "# Setup\n"),
            ("docs/internal/secrets.md", "# Secrets\n"),
        ]);
        let filter = FileFilter::new(&[], &[String::from("^/docs/internal/")]).unwrap();
        let options = SidebarRequestOptions {
            filter: Some(&filter),
            ..Default::default()
        };

        let sidebar = handle_sidebar_request("docs", tmp.path(), &options).unwrap();
        assert_eq!(sidebar.links.categories().collect::<Vec<_>>(), ["Guide"]);
    }

    #[test]
    fn test_sidebar_custom_resolvers() {
        let tmp = routes_tree(&[("docs/guide/setup.md", "# Setup\n")]);
        let resolve_title =
            |item: &SidebarItem<'_>| -> Option<String> { Some(format!("{}!", item.resolve())) };
        let format_category_name = |name: &str, format: &dyn Fn(&str) -> String| -> String {
            format(name).to_uppercase()
        };
        let options = SidebarRequestOptions {
            resolve_title: Some(&resolve_title),
            format_category_name: Some(&format_category_name),
            ..Default::default()
        };

        let sidebar = handle_sidebar_request("docs", tmp.path(), &options).unwrap();
        let guide = sidebar.links.get("GUIDE").unwrap();
        assert_eq!(guide[0].title, "Setup!");
    }

    #[test]
    fn test_sidebar_serialization() {
        let mut links = CategoryLinks::default();
        links.push(ROOT_CATEGORY, SidebarLink {
            title: "Intro".into(),
            slug: "/intro".into(),
            match_kind: None,
        });
        links.push("Guide", SidebarLink {
            title: "Setup".into(),
            slug: "/guide/setup".into(),
            match_kind: Some(MatchKind::Deep),
        });

        let json = serde_json::to_string(&Sidebar { links }).unwrap();
        assert_eq!(
            json,
            r#"{"links":{".":[{"title":"Intro","slug":"/intro"}],"Guide":[{"title":"Setup","slug":"/guide/setup","match":"deep"}]}}"#
        );
    }
}
