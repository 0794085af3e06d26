// src/core/net.rs
// HTTP GET via reqwest's blocking client. One request per run, no retry.

use std::time::Duration;

use log::{debug, info};

use crate::config::consts::USER_AGENT;
use crate::error::{QueryError, Result};

pub fn client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| QueryError::Unknown(format!("failed to build HTTP client: {e}")))
}

/// GET `url` and return the body as text.
///
/// Any transport failure, and any non-success status, comes back as
/// [`QueryError::Connection`].
pub fn fetch_page(http: &reqwest::blocking::Client, url: &str) -> Result<String> {
    let connection = |reason: String| QueryError::Connection { url: url.to_string(), reason };

    info!("GET {url}");
    let resp = http.get(url).send().map_err(|e| connection(describe(&e)))?;

    let status = resp.status();
    debug!("{url} -> {status}");
    if !status.is_success() {
        return Err(connection(format!("HTTP {status}")));
    }

    let body = resp.text().map_err(|e| connection(describe(&e)))?;
    debug!("{} bytes from {url}", body.len());
    Ok(body)
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "timed out".to_string()
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else if e.is_builder() {
        format!("bad URL: {e}")
    } else {
        e.to_string()
    }
}
