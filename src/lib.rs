//! docroute - documentation route tooling.
//!
//! Resolves URL slugs to markdown source files in a file-based routes
//! directory, derives sidebar navigation trees from the file tree, parses
//! markdown frontmatter and headings, and ships the scroll-position to
//! active-heading algorithm used by table-of-contents highlighting.

pub mod cli;
pub mod config;
pub mod logger;
pub mod markdown;
pub mod routes;
pub mod scroll;
pub mod utils;
