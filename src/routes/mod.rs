//! Route resolution, metadata and sidebar handlers.
//!
//! | Module    | Description                                         |
//! |-----------|-----------------------------------------------------|
//! | `path`    | Route parameter decoding and path decorations       |
//! | `resolve` | Slug to route file resolution                       |
//! | `order`   | Recursive listing and explicit file ordering        |
//! | `filter`  | Include/exclude filtering of clean route paths      |
//! | `meta`    | Markdown meta request handling                      |
//! | `sidebar` | Sidebar tree building                               |

mod filter;
mod meta;
mod order;
mod path;
mod resolve;
mod sidebar;

use std::path::PathBuf;

pub use filter::{DEFAULT_INCLUDE_RE, FileFilter};
pub use meta::{
    BoxedTransform, FileResolver, MetaContext, MetaRequestOptions, MetaTransform, Resolution,
    SlugResolver, handle_meta_request,
};
pub use order::{read_dir_deep, sort_ordered_files};
pub use path::{DEEP_MATCH_RE, REST_PARAMS_RE, clean_file_path, param_to_dir, param_to_slug};
pub use resolve::resolve_slug;
pub use sidebar::{
    CategoryFormatter, CategoryLinks, MatchKind, ROOT_CATEGORY, Sidebar, SidebarItem, SidebarLink,
    SidebarRequestOptions, SidebarResolver, handle_sidebar_request,
};

/// Errors surfaced by the request handlers.
///
/// Absence of a match is an error here because the handlers are asked
/// about a specific slug or directory; callers that treat absence as
/// normal match on the variant.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("no route file matches slug `{slug}`")]
    NoMatchingFile { slug: String },

    #[error("no route directory matches `{dir}`")]
    NoMatchingDir { dir: String },

    #[error("failed to read route file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
