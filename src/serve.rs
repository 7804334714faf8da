//! Development server with live rebuild support.
//!
//! A lightweight HTTP server built on `tiny_http`:
//!
//! - Static file serving from the build output directory
//! - Automatic `index.html` resolution for directories
//! - On-demand social preview rendering at `GET /og?title=...` / `?slug=...`
//! - File watching and auto-rebuild (via `watch` module)
//! - Graceful shutdown on Ctrl+C

use crate::{
    config::{SiteConfig, cfg, init_config},
    content::{self, ContentSnapshot},
    log,
    og::OgRenderer,
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result};
use std::{
    fs,
    io::Cursor,
    net::SocketAddr,
    path::{Component, Path},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Bind the dev server socket, retrying on port conflicts.
///
/// Binding happens before the initial build: when the port had to move, the
/// global config is updated first so canonical and preview URLs point at the
/// port actually bound.
pub fn bind_server() -> Result<(Server, SocketAddr)> {
    let c = cfg();
    let interface: std::net::IpAddr = c.serve.interface.parse()?;

    let (server, addr) = try_bind_port(interface, c.serve.port, MAX_PORT_RETRIES)?;
    if let Some(updated) = rebound_config(&c, addr.port()) {
        init_config(updated);
    }
    Ok((server, addr))
}

/// Config pointing at the port actually bound, or `None` when the
/// configured port was available.
fn rebound_config(config: &SiteConfig, port: u16) -> Option<SiteConfig> {
    if config.serve.port == port {
        return None;
    }
    let mut updated = config.clone();
    updated.serve.port = port;
    updated.base.url = Some(format!("http://{}:{}", updated.serve.interface, port));
    Some(updated)
}

/// Run the development server with optional file watching.
///
/// Installs a Ctrl+C handler, spawns the watcher thread when enabled, and
/// blocks handling requests until shutdown.
pub fn serve_site(server: Server, addr: SocketAddr) -> Result<()> {
    let c = cfg();
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if c.serve.watch {
        std::thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking() {
                log!("watch"; "{err}");
            }
        });
    }

    // Re-load config on each request to pick up hot-reloaded changes
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &cfg()) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => {
                continue;
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Resolution order:
/// 1. `/og` → render preview image on demand
/// 2. Exact file match → serve file
/// 3. Directory with index.html → serve index.html
/// 4. Nothing found → 404
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    let serve_root = &config.build.output;

    let (raw_path, query) = match request.url().split_once('?') {
        Some((path, query)) => (path, Some(query.to_owned())),
        None => (request.url(), None),
    };

    // Decode URL-encoded characters (e.g., %20 → space)
    let url_path = urlencoding::decode(raw_path)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();
    let request_path = url_path.trim_matches('/');

    if request_path == "og" && config.og.enable {
        return serve_og(request, config, query.as_deref());
    }

    // Decoded `..` segments must not escape the output directory
    if Path::new(request_path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return serve_not_found(request);
    }

    let local_path = serve_root.join(request_path);

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
    }

    serve_not_found(request)
}

/// Render a preview image for `GET /og?title=...` or `GET /og?slug=...`.
///
/// A `slug` parameter resolves the title from the currently published
/// content snapshot, so a rebuilt title is picked up on the next request.
/// The font and background are read fresh on each request for the same
/// reason. A missing title renders the bare background; a missing font is
/// a 500.
fn serve_og(request: Request, config: &SiteConfig, query: Option<&str>) -> Result<()> {
    let title = resolve_title(query, &content::snapshot());

    let png = OgRenderer::from_config(config).and_then(|r| r.render(&title));

    match png {
        Ok(png) => {
            let response = Response::from_data(png)
                .with_header(Header::from_bytes("Content-Type", "image/png").unwrap());
            request.respond(response)?;
        }
        Err(e) => {
            log!("og"; "render failed: {:#}", e);
            let body = "preview rendering failed";
            let response = Response::new(
                StatusCode(500),
                vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
                Cursor::new(body),
                Some(body.len()),
                None,
            );
            request.respond(response)?;
        }
    }
    Ok(())
}

/// Title for a preview request: explicit `title` parameter first, else the
/// title of the post the `slug` parameter names, else empty.
fn resolve_title(query: Option<&str>, content: &ContentSnapshot) -> String {
    let Some(query) = query else {
        return String::new();
    };
    if let Some(title) = query_param(query, "title") {
        return title;
    }
    query_param(query, "slug")
        .and_then(|slug| content.post_by_slug(&slug).map(|p| p.title.clone()))
        .unwrap_or_default()
}

/// Extract one decoded parameter from a raw query string.
fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != name {
            return None;
        }
        let value = value.replace('+', " ");
        Some(
            urlencoding::decode(&value)
                .map(std::borrow::Cow::into_owned)
                .unwrap_or(value),
        )
    })
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",

        // Default binary
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;
    use std::io::{Read, Write};
    use std::net::TcpStream;

    fn snapshot_with_post(slug: &str, title: &str) -> ContentSnapshot {
        ContentSnapshot {
            posts: vec![Post {
                id: slug.to_owned(),
                title: title.to_owned(),
                description: None,
                slug: slug.to_owned(),
                date: None,
                html: String::new(),
            }],
            about: None,
        }
    }

    /// Issue one request and return the status line plus the raw body.
    fn http_get(addr: SocketAddr, target: &str) -> (String, Vec<u8>) {
        let mut stream = TcpStream::connect(addr).unwrap();
        write!(
            stream,
            "GET {target} HTTP/1.1\r\nHost: localhost\r\nTE: identity\r\nConnection: close\r\n\r\n"
        )
        .unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).unwrap();

        let split = raw.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
        let status = String::from_utf8_lossy(&raw[..split])
            .lines()
            .next()
            .unwrap_or_default()
            .to_owned();
        (status, raw[split + 4..].to_vec())
    }

    #[test]
    fn test_handle_request_over_http() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("public");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("index.html"), "<html>home</html>").unwrap();
        fs::write(tmp.path().join("secret.txt"), "top secret").unwrap();
        // Unparsable font bytes load fine; the title text is just dropped
        fs::write(tmp.path().join("og.ttf"), b"not a real font").unwrap();

        let mut config = SiteConfig::default();
        config.build.output = output;
        config.og.font = tmp.path().join("og.ttf");

        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handler = std::thread::spawn(move || {
            for _ in 0..4 {
                let request = server.recv().unwrap();
                handle_request(request, &config).unwrap();
            }
        });

        let (status, body) = http_get(addr, "/og?title=Hello%20World");
        assert!(status.contains("200"), "unexpected status: {status}");
        let png = image::load_from_memory(&body).unwrap();
        assert_eq!((png.width(), png.height()), (1920, 1080));

        let (status, body) = http_get(addr, "/og");
        assert!(status.contains("200"), "unexpected status: {status}");
        let png = image::load_from_memory(&body).unwrap();
        assert_eq!((png.width(), png.height()), (1920, 1080));

        let (status, body) = http_get(addr, "/");
        assert!(status.contains("200"), "unexpected status: {status}");
        assert!(body.windows(4).any(|w| w == b"home"));

        // Encoded `..` must not reach files outside the output directory
        let (status, body) = http_get(addr, "/%2e%2e/secret.txt");
        assert!(status.contains("404"), "unexpected status: {status}");
        assert!(!body.windows(10).any(|w| w == b"top secret"));

        handler.join().unwrap();
    }

    #[test]
    fn test_resolve_title_prefers_title_param() {
        let snap = snapshot_with_post("hello", "Hello World");

        assert_eq!(
            resolve_title(Some("title=Explicit&slug=hello"), &snap),
            "Explicit"
        );
    }

    #[test]
    fn test_resolve_title_from_slug() {
        let snap = snapshot_with_post("hello", "Hello World");

        assert_eq!(resolve_title(Some("slug=hello"), &snap), "Hello World");
        assert_eq!(resolve_title(Some("slug=missing"), &snap), "");
        assert_eq!(resolve_title(None, &snap), "");
    }

    #[test]
    fn test_rebound_config_updates_url() {
        let mut config = SiteConfig::default();
        config.serve.port = 4477;

        assert!(rebound_config(&config, 4477).is_none());

        let updated = rebound_config(&config, 4478).unwrap();
        assert_eq!(updated.serve.port, 4478);
        assert_eq!(updated.base.url.as_deref(), Some("http://127.0.0.1:4478"));
    }

    #[test]
    fn test_query_param() {
        assert_eq!(
            query_param("title=Hello%20World", "title"),
            Some("Hello World".to_string())
        );
        assert_eq!(
            query_param("a=1&title=Post&b=2", "title"),
            Some("Post".to_string())
        );
        assert_eq!(query_param("a=1&b=2", "title"), None);
        assert_eq!(query_param("", "title"), None);
    }

    #[test]
    fn test_query_param_plus_as_space() {
        assert_eq!(
            query_param("title=Hello+World", "title"),
            Some("Hello World".to_string())
        );
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(
            guess_content_type(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(guess_content_type(Path::new("og/hello.png")), "image/png");
        assert_eq!(guess_content_type(Path::new("font.woff2")), "font/woff2");
        assert_eq!(
            guess_content_type(Path::new("blob.bin")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_try_bind_port_retries_on_conflict() {
        let interface: std::net::IpAddr = "127.0.0.1".parse().unwrap();

        // Occupy an ephemeral port, then ask to bind starting from it
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = taken.local_addr().unwrap().port();

        let (_server, addr) = try_bind_port(interface, base, MAX_PORT_RETRIES).unwrap();
        assert_ne!(addr.port(), base);
        assert!(addr.port() > base);
    }
}
