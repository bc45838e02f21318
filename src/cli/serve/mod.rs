//! Development server exposing the request handlers as JSON endpoints.
//!
//! | Endpoint                       | Body                                |
//! |--------------------------------|-------------------------------------|
//! | `GET /meta/{slug_param}.json`  | Parsed markdown metadata or `null`  |
//! | `GET /sidebar/{dir_param}.json`| `{ links: { category: [...] } }`    |
//!
//! Handler failures degrade to a `null` body (availability over strict
//! error surfacing); the error itself is logged only in debug mode.

mod response;

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, anyhow};
use percent_encoding::percent_decode_str;
use tiny_http::{Request, Server};

use crate::config::Config;
use crate::routes::{MetaRequestOptions, SidebarRequestOptions};
use crate::{debug, log, routes};

/// Start the request loop (blocking until Ctrl-C).
pub fn serve(config: &Config) -> Result<()> {
    let addr = SocketAddr::new(config.serve.interface, config.serve.port);
    let server =
        Server::http(addr).map_err(|source| anyhow!("failed to bind {addr}: {source}"))?;
    let server = Arc::new(server);

    log!("serve"; "http://{addr}");
    debug!("serve"; "routes dir {}", config.routes_dir().display());

    // Ctrl-C unblocks the accept loop.
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let server = Arc::clone(&server);
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::SeqCst);
            server.unblock();
        })
        .context("failed to set Ctrl-C handler")?;
    }

    // Thread pool keeps slow filesystem walks from blocking other requests
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .context("failed to create thread pool")?;

    let config = Arc::new(config.clone());
    for request in server.incoming_requests() {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        let config = Arc::clone(&config);
        pool.spawn(move || {
            if let Err(error) = handle_request(request, &config) {
                log!("serve"; "request error: {error}");
            }
        });
    }

    log!("serve"; "shutting down");
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &Config) -> Result<()> {
    let url = request.url();
    let path = url.split('?').next().unwrap_or(url);
    let path = percent_decode_str(path).decode_utf8_lossy().into_owned();

    if let Some(param) = route_param(&path, "/meta/") {
        let body = meta_body(&param, config);
        return response::respond_json(request, &body);
    }

    if let Some(param) = route_param(&path, "/sidebar/") {
        let body = sidebar_body(&param, config);
        return response::respond_json(request, &body);
    }

    response::respond_not_found(request)
}

fn route_param(path: &str, prefix: &str) -> Option<String> {
    path.strip_prefix(prefix)?
        .strip_suffix(".json")
        .filter(|param| !param.is_empty() && !param.contains('/'))
        .map(str::to_string)
}

fn meta_body(param: &str, config: &Config) -> String {
    try_meta(param, config).unwrap_or_else(|error| {
        debug!("serve"; "meta request `{param}` failed: {error:#}");
        String::from("null")
    })
}

fn try_meta(param: &str, config: &Config) -> Result<String> {
    let filter = config.meta.build()?;
    let options = MetaRequestOptions {
        filter: Some(&filter),
        ..Default::default()
    };
    match routes::handle_meta_request(param, &config.routes_dir(), &options)? {
        Some(meta) => Ok(serde_json::to_string(&meta)?),
        None => Ok(String::from("null")),
    }
}

fn sidebar_body(param: &str, config: &Config) -> String {
    try_sidebar(param, config).unwrap_or_else(|error| {
        debug!("serve"; "sidebar request `{param}` failed: {error:#}");
        String::from("null")
    })
}

fn try_sidebar(param: &str, config: &Config) -> Result<String> {
    let filter = config.sidebar.build()?;
    let options = SidebarRequestOptions {
        filter: Some(&filter),
        ..Default::default()
    };
    let sidebar = routes::handle_sidebar_request(param, &config.routes_dir(), &options)?;
    Ok(serde_json::to_string(&sidebar)?)
}
