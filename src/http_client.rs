use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client. Timeout comes from `HTTP_TIMEOUT_SECS`; if
/// `LEAGUE_API_TOKEN` is set it is attached as a bearer header on every
/// request.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let timeout = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);

        let mut headers = HeaderMap::new();
        if let Ok(token) = std::env::var("LEAGUE_API_TOKEN") {
            let token = token.trim();
            if !token.is_empty() {
                let value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .context("invalid LEAGUE_API_TOKEN value")?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        Client::builder()
            .timeout(Duration::from_secs(timeout))
            .default_headers(headers)
            .build()
            .context("failed to build http client")
    })
}
