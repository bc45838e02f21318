//! HTTP response helpers.

use anyhow::Result;
use tiny_http::{Header, Request, Response, StatusCode};

/// Respond with a JSON body.
pub fn respond_json(request: Request, body: &str) -> Result<()> {
    let response = Response::from_string(body)
        .with_status_code(StatusCode(200))
        .with_header(json_header());
    request.respond(response)?;
    Ok(())
}

/// Respond 404 with a `null` JSON body.
pub fn respond_not_found(request: Request) -> Result<()> {
    let response = Response::from_string("null")
        .with_status_code(StatusCode(404))
        .with_header(json_header());
    request.respond(response)?;
    Ok(())
}

fn json_header() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}
