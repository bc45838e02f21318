//! Command-line interface module.

mod args;
pub mod query;
pub mod serve;

pub use args::{Cli, Commands, QueryArgs, QueryTarget};
