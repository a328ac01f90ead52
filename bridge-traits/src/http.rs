//! HTTP Client Abstraction
//!
//! Async HTTP used for graph requests such as profile picture downloads.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::{
    error::{BridgeError, Result},
    platform::PlatformSendSync,
};

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Head,
}

/// HTTP request builder
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Parse response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            BridgeError::OperationFailed(format!("JSON deserialization failed: {}", e))
        })
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Base delay between retries
    pub base_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Whether to use exponential backoff
    pub use_exponential_backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            use_exponential_backoff: true,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay to wait after the given (1-based) failed attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if !self.use_exponential_backoff || attempt == 0 {
            return self.base_delay;
        }
        let factor = 2u32.saturating_pow(attempt - 1);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Async HTTP client trait
///
/// Implementations handle connection pooling, TLS validation and retries.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest};
///
/// async fn fetch_picture(client: &dyn HttpClient, url: &str) -> Result<bytes::Bytes> {
///     let response = client.execute(HttpRequest::get(url)).await?;
///     Ok(response.body)
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait HttpClient: PlatformSendSync {
    /// Execute an HTTP request
    ///
    /// # Errors
    ///
    /// Returns error if the connection fails, TLS validation fails, the
    /// request times out or retries are exhausted.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Execute an HTTP request with custom retry policy
    ///
    /// The default makes a single attempt and ignores `policy`: this crate
    /// has no timer to wait between attempts. Clients that own a runtime
    /// override it and back off with [`RetryPolicy::delay_for_attempt`].
    async fn execute_with_retry(
        &self,
        request: HttpRequest,
        _policy: RetryPolicy,
    ) -> Result<HttpResponse> {
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_request_builder() {
        let request = HttpRequest::get("https://graph.example.com/4/picture")
            .header("Accept", "image/*")
            .timeout(Duration::from_secs(30));

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://graph.example.com/4/picture");
        assert_eq!(request.headers.get("Accept"), Some(&"image/*".to_string()));
        assert_eq!(request.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_http_response_helpers() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "image/jpeg".to_string());
        let response = HttpResponse {
            status: 200,
            headers,
            body: Bytes::from_static(b"\xff\xd8"),
        };

        assert!(response.is_success());
        assert_eq!(response.header("content-type"), Some("image/jpeg"));
        assert_eq!(response.header("etag"), None);
    }

    #[test]
    fn test_retry_delay_backoff() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for_attempt(30), Duration::from_secs(10));
    }

    #[test]
    fn test_retry_policy_none() {
        assert_eq!(RetryPolicy::none().max_attempts, 1);
    }

    struct FlakyClient {
        calls: std::sync::atomic::AtomicU32,
    }

    #[async_trait::async_trait]
    impl HttpClient for FlakyClient {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse> {
            self.calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(HttpResponse {
                status: 503,
                headers: HashMap::new(),
                body: Bytes::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_default_execute_with_retry_is_single_attempt() {
        let client = FlakyClient {
            calls: Default::default(),
        };

        let response = client
            .execute_with_retry(HttpRequest::get("https://graph.example.com"), RetryPolicy::default())
            .await
            .unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(client.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
