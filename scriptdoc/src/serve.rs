//! Local preview server.
//!
//! Every GET path maps to a file in the docs directory. Markdown files are
//! converted to HTML on each request, so regenerated pages show up on the
//! next reload.
//!
//! | Request | File |
//! |---------|------|
//! | `/` | `index.md` |
//! | `/components` | `components.md` |
//! | `/mkdocs_nav.yml` | `mkdocs_nav.yml` (raw) |

use crate::toc;
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Shared state passed to the handler via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    docs_dir: Arc<PathBuf>,
    title: Arc<str>,
}

/// Build the router serving `docs_dir`.
pub fn router(docs_dir: PathBuf, title: &str) -> Router {
    let state = AppState {
        docs_dir: Arc::new(docs_dir),
        title: Arc::from(title),
    };
    Router::new()
        .route("/", get(page))
        .route("/{*path}", get(page))
        .with_state(state)
}

/// Serve `docs_dir` on `127.0.0.1:<port>` until Ctrl+C.
pub async fn serve(docs_dir: PathBuf, title: &str, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, docs = %docs_dir.display(), "documentation server started");

    axum::serve(listener, router(docs_dir, title))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("server stopped by user");
        })
        .await
}

/// Map a request path to a file name below the docs directory.
///
/// Empty paths go to `index.md`; a last segment without an extension gets
/// `.md` appended. Paths escaping the directory resolve to nothing.
pub fn resolve_request(path: &str) -> Option<String> {
    let path = path.trim_matches('/');
    if path.is_empty() {
        return Some("index.md".to_string());
    }
    if path.contains('\\') || path.split('/').any(|s| s.is_empty() || s == "." || s == "..") {
        return None;
    }

    let last = path.rsplit('/').next().unwrap_or(path);
    if last.contains('.') {
        Some(path.to_string())
    } else {
        Some(format!("{}.md", path))
    }
}

async fn page(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(name) = resolve_request(uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let file = state.docs_dir.join(&name);
    if !file.is_file() {
        return (StatusCode::NOT_FOUND, format!("{} not found", name)).into_response();
    }

    match tokio::fs::read(&file).await {
        Ok(bytes) if name.ends_with(".md") => {
            let markdown = String::from_utf8_lossy(&bytes);
            (
                [
                    (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                    (header::CACHE_CONTROL, "no-cache"),
                ],
                render_page(&state.title, &markdown),
            )
                .into_response()
        }
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response(),
        Err(e) => {
            error!(path = %file.display(), error = %e, "failed to read page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error serving {}: {}", name, e),
            )
                .into_response()
        }
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yml" | "yaml") => "text/yaml; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Convert a markdown page to a standalone HTML document.
pub fn render_page(title: &str, markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = with_heading_ids(Parser::new_ext(markdown, options).collect());
    let mut body = String::new();
    html::push_html(&mut body, events.into_iter());

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
{STYLE}
</style>
</head>
<body>
<div class="nav">
<a href="/">Home</a>
<a href="/components">Components</a>
<a href="#" onclick="location.reload()">Refresh</a>
</div>
{body}
</body>
</html>
"##,
        title = html_escape(title),
    )
}

const STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 1200px; margin: 0 auto; padding: 20px; }
h1, h2, h3, h4, h5, h6 { color: #2c3e50; border-bottom: 1px solid #eaecef; padding-bottom: 0.3em; }
code { background-color: #f8f8f8; padding: 2px 4px; border-radius: 3px; font-family: 'SFMono-Regular', Consolas, 'Liberation Mono', Menlo, monospace; }
pre { background-color: #f8f8f8; padding: 16px; border-radius: 6px; overflow-x: auto; }
pre code { background-color: transparent; padding: 0; }
table { border-collapse: collapse; width: 100%; margin: 16px 0; }
th, td { border: 1px solid #dfe2e5; padding: 8px 12px; text-align: left; }
.nav { margin-bottom: 30px; padding: 10px; background-color: #f8f9fa; border-radius: 6px; }
.nav a { margin-right: 15px; text-decoration: none; color: #0366d6; }";

/// Give every heading an id matching the table-of-contents anchors.
fn with_heading_ids(mut events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    for i in 0..events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }
        let text: String = events[i + 1..]
            .iter()
            .take_while(|e| !matches!(e, Event::End(TagEnd::Heading(_))))
            .filter_map(|e| match e {
                Event::Text(t) | Event::Code(t) => Some(&**t),
                _ => None,
            })
            .collect();
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(toc::anchor(&text).into());
        }
    }
    events
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
