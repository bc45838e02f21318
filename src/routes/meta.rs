//! Markdown meta request handling.

use std::fs;
use std::path::{Path, PathBuf};

use super::{RouteError, clean_file_path, param_to_slug, resolve_slug};
use crate::markdown::{ParsedMarkdown, shared_parser};
use crate::routes::FileFilter;
use crate::utils::path::resolve_path;

/// Default slug resolution helper handed to caller resolvers.
pub struct SlugResolver<'a> {
    routes_dir: &'a Path,
}

impl SlugResolver<'_> {
    pub fn resolve(&self, slug: &str) -> Option<PathBuf> {
        resolve_slug(slug, self.routes_dir)
    }
}

/// Data handed to a meta transform alongside the mutable parse result.
pub struct MetaContext<'a> {
    pub slug: &'a str,
    pub file_path: &'a Path,
}

/// Mutates the parse result before it is returned; may attach computed
/// fields.
pub type MetaTransform<'a> = &'a (dyn Fn(&MetaContext<'_>, &mut ParsedMarkdown) + Sync);

/// Owned transform carried by a [`Resolution`].
pub type BoxedTransform = Box<dyn Fn(&MetaContext<'_>, &mut ParsedMarkdown) + Sync>;

/// Outcome of a caller-supplied file resolver.
pub struct Resolution {
    pub file: PathBuf,
    /// Per-resolution transform; takes precedence over the global one.
    pub transform: Option<BoxedTransform>,
}

impl From<PathBuf> for Resolution {
    fn from(file: PathBuf) -> Self {
        Self {
            file,
            transform: None,
        }
    }
}

/// Caller-supplied file resolver; receives the slug and the default
/// resolver as a helper. Returning `None` falls back to the default.
pub type FileResolver<'a> = &'a (dyn Fn(&str, &SlugResolver<'_>) -> Option<Resolution> + Sync);

#[derive(Default)]
pub struct MetaRequestOptions<'a> {
    pub filter: Option<&'a FileFilter>,
    pub resolve: Option<FileResolver<'a>>,
    pub transform: Option<MetaTransform<'a>>,
}

/// Resolve a slug parameter to a route file and parse its metadata.
///
/// Fails with [`RouteError::NoMatchingFile`] when neither the caller
/// resolver nor the default resolver can map the slug to a file; returns
/// `Ok(None)` when the resolved file is rejected by the filter.
pub fn handle_meta_request(
    slug_param: &str,
    routes_dir: &Path,
    options: &MetaRequestOptions<'_>,
) -> Result<Option<ParsedMarkdown>, RouteError> {
    let slug = param_to_slug(slug_param);
    let helper = SlugResolver { routes_dir };

    let resolution = options
        .resolve
        .and_then(|resolve| resolve(&slug, &helper))
        .or_else(|| helper.resolve(&slug).map(Resolution::from));
    let Some(resolution) = resolution else {
        return Err(RouteError::NoMatchingFile { slug });
    };

    if let Some(filter) = options.filter {
        let clean = clean_file_path(&resolution.file, routes_dir);
        if !filter.matches(&format!("/{clean}")) {
            return Ok(None);
        }
    }

    let file_path = resolve_path(&resolution.file, routes_dir);
    let content = fs::read_to_string(&file_path).map_err(|source| RouteError::Read {
        path: file_path.clone(),
        source,
    })?;

    let mut result = shared_parser().parse(&content);

    let context = MetaContext {
        slug: &slug,
        file_path: &file_path,
    };
    match &resolution.transform {
        Some(transform) => transform(&context, &mut result),
        None => {
            if let Some(transform) = options.transform {
                transform(&context, &mut result);
            }
        }
    }

    Ok(Some(result))
}
