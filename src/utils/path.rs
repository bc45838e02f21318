//! Path utilities.
//!
//! Route paths are manipulated as plain `/`-separated strings rather than
//! `std::path::Path`, because route decorations produce segments (including
//! empty ones from stripped `[...param]` directories) that `Path` would
//! normalize away. The string helpers follow POSIX `dirname`/`basename`
//! semantics.

use std::path::{Path, PathBuf};

/// Return the directory part of a `/`-separated route path.
///
/// Trailing slashes are skipped before the split, and the slash that ends
/// the directory part is kept out of the result only when it terminates a
/// non-empty segment run. An empty directory segment (`a//b.md` -> `a/`)
/// is preserved.
///
/// # Examples
/// ```
/// use docroute::utils::path::dirname;
/// assert_eq!(dirname("docs/intro.md"), "docs");
/// assert_eq!(dirname("docs//index.md"), "docs/");
/// assert_eq!(dirname("intro.md"), ".");
/// ```
pub fn dirname(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let bytes = path.as_bytes();
    let mut matched_slash = true;
    let mut end = None;
    for i in (1..bytes.len()).rev() {
        if bytes[i] == b'/' {
            if !matched_slash {
                end = Some(i);
                break;
            }
        } else {
            matched_slash = false;
        }
    }
    match end {
        Some(end) => &path[..end],
        None if bytes[0] == b'/' => "/",
        None => ".",
    }
}

/// Return the filename part of a `/`-separated route path.
///
/// # Examples
/// ```
/// use docroute::utils::path::basename;
/// assert_eq!(basename("docs/intro.md"), "intro.md");
/// assert_eq!(basename("docs/guide/"), "guide");
/// ```
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Return the extension of a path, dot included (`".md"`), or `""`.
///
/// A leading dot names a hidden file, not an extension.
///
/// # Examples
/// ```
/// use docroute::utils::path::extname;
/// assert_eq!(extname("docs/intro.md"), ".md");
/// assert_eq!(extname("docs/.hidden"), "");
/// assert_eq!(extname("docs/readme"), "");
/// ```
pub fn extname(path: &str) -> &str {
    let name = basename(path);
    if name.len() < 2 {
        return "";
    }
    match name[1..].rfind('.') {
        Some(pos) => &name[pos + 1..],
        None => "",
    }
}

/// Remove the first occurrence of `needle` from `haystack`.
///
/// Mirrors single-occurrence string replacement used when deriving slugs
/// from file paths (strip the extension where it first appears).
pub fn remove_first(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    match haystack.find(needle) {
        Some(pos) => {
            let mut out = String::with_capacity(haystack.len() - needle.len());
            out.push_str(&haystack[..pos]);
            out.push_str(&haystack[pos + needle.len()..]);
            out
        }
        None => haystack.to_string(),
    }
}

/// Resolve a path that may be relative to cwd or a fallback directory.
///
/// Tries in order:
/// 1. If absolute, use as-is
/// 2. If exists relative to cwd, normalize to absolute
/// 3. Otherwise, resolve relative to fallback_dir
#[inline]
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if path.exists() {
        return normalize_path(path);
    }

    normalize_path(&fallback_dir.join(path))
}

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`), falling
/// back to joining with the current directory.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}
