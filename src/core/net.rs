// src/core/net.rs
// Blocking HTTPS via reqwest; the whole pipeline is sequential.

use reqwest::blocking::{Client, Response};

use crate::config::consts::USER_AGENT;
use crate::error::ApiError;

/// Shared client. No timeout beyond reqwest's defaults.
pub fn client() -> Result<Client, ApiError> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

/// Turn a non-2xx response into `ApiError::Status`, keeping the body for the log.
pub fn check_status(resp: Response, endpoint: &str) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp
        .text()
        .unwrap_or_else(|_| s!("<body unavailable>"));
    Err(ApiError::Status {
        endpoint: s!(endpoint),
        status: status.as_u16(),
        body,
    })
}

/// GET a page as text.
pub fn http_get(client: &Client, url: &str) -> Result<String, ApiError> {
    let resp = client.get(url).send()?;
    Ok(check_status(resp, url)?.text()?)
}
