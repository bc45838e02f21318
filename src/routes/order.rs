//! Recursive route listing and the explicit file ordering convention.
//!
//! Route authors control sidebar order with a numeric rest-parameter
//! prefix: `[...1]getting-started/[...2]installation.md`. Sorting is
//! per path segment: explicitly numbered entries come first in numeric
//! order, unnumbered entries follow alphabetically by cleaned name.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::path::REST_PARAMS_RE;

/// List all files under a directory recursively (sorted walk).
pub fn read_dir_deep(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .collect()
}

/// Sort files by the ordering convention, relative to the routes root.
pub fn sort_ordered_files(mut files: Vec<PathBuf>, routes_dir: &Path) -> Vec<PathBuf> {
    files.sort_by_cached_key(|file| order_key(file, routes_dir));
    files
}

type SegmentKey = (bool, u64, String);

fn order_key(file: &Path, routes_dir: &Path) -> Vec<SegmentKey> {
    let relative = file.strip_prefix(routes_dir).unwrap_or(file);
    relative
        .to_string_lossy()
        .split('/')
        .map(segment_key)
        .collect()
}

/// Key: (unnumbered?, explicit order, cleaned name).
fn segment_key(segment: &str) -> SegmentKey {
    let order = REST_PARAMS_RE
        .captures(segment)
        .and_then(|captures| captures.get(1))
        .and_then(|param| leading_number(param.as_str()));
    let cleaned = REST_PARAMS_RE.replace_all(segment, "").into_owned();
    match order {
        Some(n) => (false, n, cleaned),
        None => (true, 0, cleaned),
    }
}

fn leading_number(param: &str) -> Option<u64> {
    let digits: String = param.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
