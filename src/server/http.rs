//! Blocking HTTP front end over [`ArtifactStore`].
//!
//! Requests are answered one at a time on the serving thread, so a request that triggers
//! generation holds up the ones behind it until the GIF is on disk.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use sha2::Digest as _;
use tiny_http::{Header, Method, Request, Response, Server};

use crate::{
    foundation::error::{OrreryError, OrreryResult},
    service::{
        artifact::ArtifactStore,
        pages::{GIF_ROUTE, REGENERATE_ROUTE, VIEWER_ROUTE, landing_page, viewer_page},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Get,
    Head,
    Post,
    Other,
}

impl From<&Method> for Verb {
    fn from(m: &Method) -> Self {
        match m {
            Method::Get => Verb::Get,
            Method::Head => Verb::Head,
            Method::Post => Verb::Post,
            _ => Verb::Other,
        }
    }
}

/// Transport-independent response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            headers: Vec::new(),
            body: body.into().into_bytes(),
        }
    }

    fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            headers: Vec::new(),
            body: body.into().into_bytes(),
        }
    }
}

/// Route one request. `if_none_match` is the raw `If-None-Match` header, if any.
pub fn route(store: &ArtifactStore, verb: Verb, url: &str, if_none_match: Option<&str>) -> Reply {
    let path = url.split(['?', '#']).next().unwrap_or("/");
    let result = match (verb, path) {
        (Verb::Get | Verb::Head, "/") => Ok(Reply::html(landing_page())),
        (Verb::Get | Verb::Head, VIEWER_ROUTE) => viewer(store),
        (Verb::Get | Verb::Head, GIF_ROUTE) => gif(store, if_none_match),
        (Verb::Get | Verb::Post, REGENERATE_ROUTE) => regenerate(store),
        _ => Ok(Reply::text(404, "Not Found")),
    };

    result.unwrap_or_else(|err| {
        tracing::error!(%path, error = %err, "request failed");
        Reply::text(500, format!("failed to produce orbit animation: {err}"))
    })
}

fn viewer(store: &ArtifactStore) -> OrreryResult<Reply> {
    // Content hash, so every regeneration that changes the bytes changes the URL.
    let digest = sha256_hex(&store.read_bytes()?);
    let canvas = store.opts().canvas;
    Ok(Reply::html(viewer_page(
        &digest[..16],
        canvas.width,
        canvas.height,
    )))
}

fn gif(store: &ArtifactStore, if_none_match: Option<&str>) -> OrreryResult<Reply> {
    let bytes = store.read_bytes()?;
    let etag = format!("\"{}\"", sha256_hex(&bytes));
    let headers = vec![
        ("Cache-Control", "no-cache".to_string()),
        ("ETag", etag.clone()),
    ];

    if if_none_match.is_some_and(|v| v.split(',').any(|t| t.trim() == etag)) {
        return Ok(Reply {
            status: 304,
            content_type: "image/gif",
            headers,
            body: Vec::new(),
        });
    }

    Ok(Reply {
        status: 200,
        content_type: "image/gif",
        headers,
        body: bytes,
    })
}

fn regenerate(store: &ArtifactStore) -> OrreryResult<Reply> {
    store.regenerate()?;
    Ok(Reply::text(
        200,
        format!("Regenerated {}\n", store.path().display()),
    ))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

pub struct HttpServer {
    server: Arc<Server>,
    store: Arc<ArtifactStore>,
}

impl HttpServer {
    pub fn bind(addr: &str, store: Arc<ArtifactStore>) -> OrreryResult<Self> {
        let server = Server::http(addr)
            .map_err(|e| OrreryError::Other(anyhow::anyhow!("failed to bind {addr}: {e}")))?;
        Ok(Self {
            server: Arc::new(server),
            store,
        })
    }

    pub fn local_port(&self) -> Option<u16> {
        self.server.server_addr().to_ip().map(|addr| addr.port())
    }

    /// Answer requests until the server is unblocked.
    pub fn serve(&self) {
        tracing::info!(
            port = self.local_port(),
            artifact = %self.store.path().display(),
            "serving orbit animation"
        );
        for request in self.server.incoming_requests() {
            if let Err(err) = handle_request(request, &self.store) {
                tracing::error!(error = %err, "failed to send response");
            }
        }
    }

    /// Serve on a background thread.
    pub fn spawn(self) -> ServerHandle {
        let port = self.local_port();
        let server = self.server.clone();
        let thread = thread::spawn(move || self.serve());
        ServerHandle {
            server,
            port,
            thread: Some(thread),
        }
    }
}

pub struct ServerHandle {
    server: Arc<Server>,
    port: Option<u16>,
    thread: Option<JoinHandle<()>>,
}

impl ServerHandle {
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn stop(&mut self) {
        self.server.unblock();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_request(request: Request, store: &ArtifactStore) -> OrreryResult<()> {
    let verb = Verb::from(request.method());
    let url = request.url().to_string();
    let if_none_match = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("If-None-Match"))
        .map(|h| h.value.as_str().to_string());

    tracing::debug!(method = %request.method(), %url, "request");
    let reply = route(store, verb, &url, if_none_match.as_deref());

    let mut response = Response::from_data(reply.body).with_status_code(reply.status);
    response.add_header(header("Content-Type", reply.content_type)?);
    for (name, value) in &reply.headers {
        response.add_header(header(name, value)?);
    }

    request
        .respond(response)
        .map_err(|e| OrreryError::Other(anyhow::Error::new(e).context("write http response")))
}

fn header(name: &str, value: &str) -> OrreryResult<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes())
        .map_err(|_| OrreryError::validation(format!("invalid http header {name}: {value}")))
}

#[cfg(test)]
#[path = "../../tests/unit/server/http.rs"]
mod tests;
