//! Utility modules for route and string handling.

pub mod path;
pub mod string;
