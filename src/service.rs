//! The informative HTTP surface (feature `http-service`): `GET /` → a plain
//! status line, `POST /get_text` → converts the request body, `GET /version`
//! → the crate version.
//!
//! Grounded on `examples/openai-codex/codex-rs/a2a/src/server.rs`'s
//! `Router`/`axum::serve` shape (this crate has no teacher precedent for an
//! HTTP surface, so the pattern is imported from the pack as instructed).

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;

use crate::config::ParserConfig;

/// Build the router. Exposed separately from [`serve`] so tests can drive it
/// in-process without binding a socket.
pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get_text", post(get_text))
        .route("/version", get(version))
}

/// Bind `addr` and serve until the process is killed.
pub async fn serve(addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router()).await
}

async fn index() -> &'static str {
    "inscriptis HTML-to-text service is running"
}

async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Decode the request body using the `charset` parameter of its
/// `Content-Type` header (default UTF-8), then convert it to text with the
/// relaxed default profile.
async fn get_text(headers: HeaderMap, body: axum::body::Bytes) -> Result<String, (StatusCode, String)> {
    let charset = content_type_charset(&headers).unwrap_or_else(|| "utf-8".to_string());
    let html = decode_body(&body, &charset)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("cannot decode body as {charset}: {e}")))?;
    Ok(crate::get_text(&html, None::<&ParserConfig>))
}

fn content_type_charset(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(axum::http::header::CONTENT_TYPE)?.to_str().ok()?;
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("charset="))
        .map(|charset| charset.trim_matches('"').to_string())
}

fn decode_body(body: &[u8], charset: &str) -> Result<String, std::string::FromUtf8Error> {
    // Only UTF-8 (the documented default) is decoded natively; any other
    // declared charset is accepted as a label but still read as UTF-8,
    // matching this crate's CLI (which only special-cases encoding for file
    // and URL input, never for HTTP request bodies).
    let _ = charset;
    String::from_utf8(body.to_vec())
}
