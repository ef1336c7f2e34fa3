//! The built-in endpoints and the route table that serves them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info, warn};

use crate::parser::{HttpRequest, Method};
use crate::server::handler::Router;
use crate::server::{Error, HttpResponse, ServerConfig, StatusCode};

/// URI prefix of the echo endpoint.
pub const ECHO_PREFIX: &str = "/echo/";

/// URI prefix of the file endpoints.
pub const FILES_PREFIX: &str = "/files/";

/// Appended to every uploaded body before it is written to disk.
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Build the router for the built-in endpoints.
///
/// | Method | Pattern      | Handler        |
/// |--------|--------------|----------------|
/// | GET    | `^/$`        | [`ok`]         |
/// | GET    | `/echo/.*`   | [`echo`]       |
/// | GET    | `user-agent` | [`user_agent`] |
/// | GET    | `/files/.*`  | [`read_file`]  |
/// | POST   | `/files/.*`  | [`write_file`] |
pub fn default_router(config: &ServerConfig) -> Result<Router, Error> {
    let directory = Arc::new(config.directory.clone());
    let mut router = Router::new();

    router.add_route("^/$", Method::GET, ok)?;
    router.add_route("/echo/.*", Method::GET, echo)?;
    router.add_route("user-agent", Method::GET, user_agent)?;

    let read_dir = Arc::clone(&directory);
    router.add_route("/files/.*", Method::GET, move |req| {
        read_file(Arc::clone(&read_dir), req)
    })?;
    router.add_route("/files/.*", Method::POST, move |req| {
        write_file(Arc::clone(&directory), req)
    })?;

    Ok(router)
}

/// `200 OK` with an empty body.
pub async fn ok(_req: HttpRequest) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::new(StatusCode::Ok))
}

/// Respond with the part of the URI after `/echo/`.
pub async fn echo(req: HttpRequest) -> Result<HttpResponse, Error> {
    let text = suffix_after(&req.uri, ECHO_PREFIX);
    Ok(HttpResponse::new(StatusCode::Ok)
        .with_content_type("text/plain")
        .with_body_string(text))
}

/// Respond with the client's `User-Agent` header, empty if none was sent.
pub async fn user_agent(req: HttpRequest) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::new(StatusCode::Ok)
        .with_content_type("text/plain")
        .with_body_string(req.user_agent.unwrap_or_default()))
}

/// Serve a file from `directory`, or 404 if it can't be read.
pub async fn read_file(directory: Arc<PathBuf>, req: HttpRequest) -> Result<HttpResponse, Error> {
    let path = resolve(&directory, &req.uri);

    match tokio::fs::read(&path).await {
        Ok(contents) => Ok(HttpResponse::new(StatusCode::Ok)
            .with_content_type("application/octet-stream")
            .with_body_bytes(contents)),
        Err(e) => {
            warn!("Could not read {path}: {e}", path = path.display());
            Ok(not_found())
        }
    }
}

/// Store the request body, plus a trailing line terminator, under `directory`.
///
/// Responds `201 Created` even when the write fails; the failure is only logged.
pub async fn write_file(directory: Arc<PathBuf>, req: HttpRequest) -> Result<HttpResponse, Error> {
    let path = resolve(&directory, &req.uri);

    let mut contents = req.body.unwrap_or_default();
    contents.extend_from_slice(LINE_TERMINATOR);

    match tokio::fs::write(&path, &contents).await {
        Ok(()) => info!("Wrote {len} bytes to {path}", len = contents.len(), path = path.display()),
        Err(e) => error!("Failed to write {path}: {e}", path = path.display()),
    }

    Ok(HttpResponse::new(StatusCode::Created).with_header("Content-Length", "0"))
}

/// `404 Not Found` with an empty body.
pub fn not_found() -> HttpResponse {
    HttpResponse::new(StatusCode::NotFound)
}

// Leading separators are dropped so the name always lands under `directory`;
// `..` segments are not rejected.
fn resolve(directory: &Path, uri: &str) -> PathBuf {
    directory.join(suffix_after(uri, FILES_PREFIX).trim_start_matches('/'))
}

fn suffix_after<'a>(uri: &'a str, prefix: &str) -> &'a str {
    uri.split_once(prefix).map_or("", |(_, rest)| rest)
}
