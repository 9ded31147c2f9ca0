//! Azure OpenAI status handling.
//!
//! Throttled responses carry `retry-after-ms` (and usually `retry-after` in
//! seconds). Error bodies use the `{"error": {"code", "message"}}` envelope.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Deserialize;

use crate::error::CompletionError;

/// Delay reported when a 429 names none.
const DEFAULT_RETRY_AFTER_MS: u64 = 60_000;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: String,
}

/// Pass successful responses through; map 429 to
/// [`CompletionError::RateLimited`] and other failures to
/// [`CompletionError::Api`].
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, CompletionError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(CompletionError::RateLimited {
            retry_after_ms: retry_after_ms(resp.headers()),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    Err(CompletionError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// `retry-after-ms`, else `retry-after` seconds, else the default.
fn retry_after_ms(headers: &HeaderMap) -> u64 {
    let number = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };

    number("retry-after-ms")
        .or_else(|| number("retry-after").map(|secs| secs.saturating_mul(1000)))
        .unwrap_or(DEFAULT_RETRY_AFTER_MS)
}

/// `code: message` from the error envelope, or the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorBody {
                code: Some(code),
                message,
            },
        }) => format!("{code}: {message}"),
        Ok(ErrorEnvelope {
            error: ErrorBody {
                code: None,
                message,
            },
        }) => message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn mock_response(status: u16, headers: &[(&str, &str)], body: &'static str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    #[rstest]
    #[case(&[("retry-after-ms", "1500"), ("retry-after", "2")], 1500)]
    #[case(&[("retry-after", "12")], 12_000)]
    #[case(&[("retry-after", "Wed, 21 Oct 2026 07:28:00 GMT")], 60_000)]
    #[case(&[], 60_000)]
    fn throttle_delay_prefers_milliseconds(
        #[case] headers: &[(&str, &str)],
        #[case] expected: u64,
    ) {
        let resp = mock_response(429, headers, "");
        assert_eq!(retry_after_ms(resp.headers()), expected);
    }

    #[tokio::test]
    async fn throttled_deployment_is_rate_limited() {
        let resp = mock_response(429, &[("retry-after-ms", "800")], "");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            CompletionError::RateLimited { retry_after_ms: 800 }
        ));
    }

    #[tokio::test]
    async fn error_envelope_is_unwrapped() {
        let resp = mock_response(
            400,
            &[],
            r#"{"error":{"code":"BadRequest","message":"Invalid schema for response_format 'adversary_verdict'.","param":"response_format","type":"invalid_request_error"}}"#,
        );
        match check_response(resp).await.unwrap_err() {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(
                    message,
                    "BadRequest: Invalid schema for response_format 'adversary_verdict'."
                );
            }
            other => panic!("expected API error, got {other}"),
        }
    }

    #[tokio::test]
    async fn unstructured_body_is_kept() {
        let resp = mock_response(401, &[], "Access denied due to invalid subscription key.");
        match check_response(resp).await.unwrap_err() {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Access denied due to invalid subscription key.");
            }
            other => panic!("expected API error, got {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = mock_response(200, &[], "{}");
        assert!(check_response(resp).await.is_ok());
    }
}
