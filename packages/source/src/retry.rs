//! HTTP retry helper for transient upstream errors.
//!
//! Every Socrata request goes through [`send_json`] instead of calling
//! `reqwest::RequestBuilder::send()` directly, so connection failures,
//! timeouts, rate limiting (429) and server errors (5xx) are retried with
//! exponential backoff. Other 4xx responses are permanent and fail
//! immediately.

use std::time::Duration;

use crate::SourceError;

/// Maximum number of retry attempts after the first request.
///
/// Searches are interactive, so the budget is small: backoff of 0.5s, 1s
/// and 2s gives up after 3.5 seconds of waiting.
const MAX_RETRIES: u32 = 3;

/// Base delay for the exponential backoff.
const BASE_DELAY_MS: u64 = 500;

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 300;

/// Sends an HTTP request and parses the response body as JSON.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails after all retries, the
/// server returns a non-retryable status code, or the body is not valid
/// JSON.
#[allow(clippy::future_not_send)]
pub async fn send_json<F>(build_request: F) -> Result<serde_json::Value, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let response = send_with_retry(&build_request).await?;
    let url = response.url().to_string();
    let text = response.text().await?;

    serde_json::from_str(&text).map_err(|e| {
        let preview: String = text.chars().take(BODY_PREVIEW_LEN).collect();
        log::error!(
            "JSON parse failed\n  \
             url: {url}\n  \
             received: {} bytes\n  \
             parse error: {e}\n  \
             body preview: {preview}",
            text.len(),
        );
        SourceError::Json(e)
    })
}

/// Retry loop: sends the request until it succeeds, fails permanently, or
/// the retry budget is spent.
#[allow(clippy::future_not_send)]
async fn send_with_retry<F>(build_request: &F) -> Result<reqwest::Response, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut attempt = 0;

    loop {
        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && attempt < MAX_RETRIES {
                    log::warn!("  transient error: {e}");
                } else {
                    return Err(SourceError::Http(e));
                }
            }
            Ok(response) => {
                let status = response.status();
                if status.is_success() || status.is_redirection() {
                    return Ok(response);
                }

                let url = response.url().to_string();
                if !is_retryable_status(status) || attempt >= MAX_RETRIES {
                    let body = response.text().await.unwrap_or_default();
                    let preview: String = body.chars().take(BODY_PREVIEW_LEN).collect();
                    log::error!("HTTP {status} from {url}: {preview}");
                    return Err(SourceError::Status {
                        status: status.as_u16(),
                        url,
                    });
                }
                log::warn!("  HTTP {status} from {url}");
            }
        }

        attempt += 1;
        let delay = backoff(attempt);
        log::warn!("  retry {attempt}/{MAX_RETRIES} in {delay:?}...");
        tokio::time::sleep(delay).await;
    }
}

/// Delay before retry number `attempt` (1-based): 0.5s, 1s, 2s, ...
const fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS << attempt.saturating_sub(1))
}

/// Returns `true` for 429 and 5xx responses.
fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_request()
}
