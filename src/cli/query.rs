//! Query command implementation.
//!
//! Prints the same JSON bodies the server would respond with, for use in
//! scripts and build pipelines.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::args::{QueryArgs, QueryTarget};
use crate::config::Config;
use crate::debug;
use crate::routes::{
    MetaRequestOptions, SidebarRequestOptions, handle_meta_request, handle_sidebar_request,
};

/// Execute query command
pub fn run_query(args: &QueryArgs, config: &Config) -> Result<()> {
    let routes_dir = config.routes_dir();
    debug!("query"; "routes dir {}", routes_dir.display());

    let body = match &args.target {
        QueryTarget::Meta { param } => {
            let filter = config.meta.build()?;
            let options = MetaRequestOptions {
                filter: Some(&filter),
                ..Default::default()
            };
            match handle_meta_request(param, &routes_dir, &options)
                .with_context(|| format!("meta query `{param}` failed"))?
            {
                Some(meta) => to_json(&meta, args.pretty)?,
                None => String::from("null"),
            }
        }
        QueryTarget::Sidebar { param } => {
            let filter = config.sidebar.build()?;
            let options = SidebarRequestOptions {
                filter: Some(&filter),
                ..Default::default()
            };
            let sidebar = handle_sidebar_request(param, &routes_dir, &options)
                .with_context(|| format!("sidebar query `{param}` failed"))?;
            to_json(&sidebar, args.pretty)?
        }
    };

    // Raw JSON on stdout so the output can be piped.
    println!("{body}");
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
