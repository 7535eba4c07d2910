//! Invocation client for the function invoke endpoint
//!
//! The client issues the actual benchmarked calls. The transport is tuned for
//! sustained concurrent load against a single host: a large idle connection
//! pool, TCP keepalive, and a bounded connect timeout. There is deliberately
//! no overall request timeout, so a slow function is measured rather than
//! aborted.

use crate::error::{AppError, Result};
use crate::types::InvocationStatus;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

/// Issues one invocation against an already resolved target
pub trait Invoker: Send + Sync {
    /// Invoke the target once and report what came back.
    ///
    /// Returns `Err` only when the request could not be issued at all.
    /// Failures after the request went out (transport errors, error status
    /// codes) are reported inside the outcome so the caller still has a
    /// timing sample to record.
    fn invoke(&self, target_id: &str) -> Result<InvocationOutcome>;
}

/// What came back from a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutcome {
    /// HTTP status code, if a response was received
    pub status_code: Option<u16>,
    /// Transport error description, if the call failed in transit
    pub error: Option<String>,
    /// Bounded response body excerpt, kept for error status diagnostics
    pub body_excerpt: Option<String>,
}

impl InvocationOutcome {
    /// Whether the invocation returned a success status code
    pub fn is_success(&self) -> bool {
        matches!(self.status_code, Some(code) if (200..300).contains(&code))
    }

    /// Classify this outcome
    pub fn status(&self) -> InvocationStatus {
        if self.is_success() {
            InvocationStatus::Success
        } else {
            InvocationStatus::Failed
        }
    }
}

/// Invocation client backed by a pooled blocking HTTP client
pub struct InvokeClient {
    /// HTTP client with the tuned transport
    client: Client,
    /// Base URL of the service, without trailing slash
    base_url: String,
}

impl InvokeClient {
    /// Create a new invocation client for the given service base URL
    pub fn new(host: &str) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(crate::defaults::CONNECT_TIMEOUT)
            .tcp_keepalive(crate::defaults::TCP_KEEPALIVE)
            .pool_max_idle_per_host(crate::defaults::POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(crate::defaults::POOL_IDLE_TIMEOUT)
            .user_agent(format!(
                "function-latency-tester/{} (https://github.com/MaurUppi/function-latency-tester)",
                crate::VERSION
            ))
            .build()
            .map_err(|e| AppError::invocation(format!("Failed to create invocation client: {}", e)))?;

        Ok(Self {
            client,
            base_url: host.trim_end_matches('/').to_string(),
        })
    }

    /// Full invoke URL for a target id
    pub fn invoke_url(&self, target_id: &str) -> String {
        format!("{}/invoke/{}", self.base_url, target_id)
    }
}

impl Invoker for InvokeClient {
    fn invoke(&self, target_id: &str) -> Result<InvocationOutcome> {
        let url = self.invoke_url(target_id);

        // Building the request is the "issue" boundary. A failure here means
        // no request went out and no sample should be recorded.
        let request = self.client
            .post(&url)
            .header(CONTENT_TYPE, crate::defaults::INVOKE_CONTENT_TYPE)
            .body("")
            .build()
            .map_err(|e| AppError::invocation(format!("Failed to build invoke request: {}", e)))?;

        match self.client.execute(request) {
            Ok(response) => {
                let status_code = response.status().as_u16();
                let success = (200..300).contains(&status_code);

                // Drain the body so the connection goes back to the pool
                match response.bytes() {
                    Ok(body) => Ok(InvocationOutcome {
                        status_code: Some(status_code),
                        error: None,
                        body_excerpt: if success { None } else { Some(body_excerpt(&body)) },
                    }),
                    Err(e) => Ok(InvocationOutcome {
                        status_code: Some(status_code),
                        error: Some(format!("Failed to read response body: {}", e)),
                        body_excerpt: None,
                    }),
                }
            }
            Err(e) => Ok(InvocationOutcome {
                status_code: None,
                error: Some(e.to_string()),
                body_excerpt: None,
            }),
        }
    }
}

/// Bounded, lossy string view of a response body
fn body_excerpt(body: &[u8]) -> String {
    let limit = crate::defaults::BODY_EXCERPT_LIMIT.min(body.len());
    String::from_utf8_lossy(&body[..limit]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = InvokeClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_invoke_url() {
        let client = InvokeClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.invoke_url("fn-01"), "http://localhost:8080/invoke/fn-01");
    }

    #[test]
    fn test_outcome_success_classification() {
        let ok = InvocationOutcome {
            status_code: Some(200),
            error: None,
            body_excerpt: None,
        };
        assert!(ok.is_success());
        assert_eq!(ok.status(), InvocationStatus::Success);

        let accepted = InvocationOutcome {
            status_code: Some(202),
            error: None,
            body_excerpt: None,
        };
        assert!(accepted.is_success());

        let server_error = InvocationOutcome {
            status_code: Some(502),
            error: None,
            body_excerpt: Some("bad gateway".to_string()),
        };
        assert!(!server_error.is_success());
        assert_eq!(server_error.status(), InvocationStatus::Failed);

        let transport = InvocationOutcome {
            status_code: None,
            error: Some("connection reset".to_string()),
            body_excerpt: None,
        };
        assert!(!transport.is_success());
        assert_eq!(transport.status(), InvocationStatus::Failed);
    }

    #[test]
    fn test_body_excerpt_bounds() {
        let short = b"hello";
        assert_eq!(body_excerpt(short), "hello");

        let long = vec![b'x'; crate::defaults::BODY_EXCERPT_LIMIT + 100];
        let excerpt = body_excerpt(&long);
        assert_eq!(excerpt.len(), crate::defaults::BODY_EXCERPT_LIMIT);
    }

    #[test]
    fn test_body_excerpt_lossy() {
        // Invalid UTF-8 gets replaced rather than failing
        let bytes = vec![0xff, 0xfe, b'o', b'k'];
        let excerpt = body_excerpt(&bytes);
        assert!(excerpt.contains("ok"));
    }
}
