//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy},
};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("app-bridge-sdk/", env!("CARGO_PKG_VERSION"));

/// Reqwest-based HTTP client implementation
///
/// Provides connection pooling, TLS and retries with exponential backoff on
/// `5xx`/`429` responses and transport errors.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(4)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                BridgeError::NotAvailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Wrap a preconfigured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }

    fn build_request(&self, request: &HttpRequest) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(Self::convert_method(request.method), &request.url);

        for (key, value) in &request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = &request.body {
            req = req.body(body.clone());
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        req
    }

    async fn send_once(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, Attempt> {
        let response = match self.build_request(request).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err(Attempt::Retry(BridgeError::OperationFailed(
                    "Request timed out".to_string(),
                )))
            }
            Err(e) => {
                return Err(Attempt::Retry(BridgeError::OperationFailed(format!(
                    "Connection failed: {}",
                    e
                ))))
            }
        };

        let status = response.status().as_u16();
        if status >= 500 || status == 429 {
            return Err(Attempt::Retry(BridgeError::OperationFailed(format!(
                "HTTP {} error",
                status
            ))));
        }

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Attempt::Fatal(BridgeError::OperationFailed(e.to_string())))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

enum Attempt {
    Retry(BridgeError),
    Fatal(BridgeError),
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.execute_with_retry(request, RetryPolicy::default())
            .await
    }

    async fn execute_with_retry(
        &self,
        request: HttpRequest,
        policy: RetryPolicy,
    ) -> Result<HttpResponse> {
        let mut last_error = None;

        for attempt in 1..=policy.max_attempts.max(1) {
            debug!(
                attempt,
                max_attempts = policy.max_attempts,
                "Executing HTTP request"
            );

            match self.send_once(&request).await {
                Ok(response) => return Ok(response),
                Err(Attempt::Fatal(error)) => return Err(error),
                Err(Attempt::Retry(error)) => {
                    warn!(error = %error, attempt, "HTTP request failed");
                    last_error = Some(error);
                }
            }

            if attempt < policy.max_attempts {
                let delay = policy.delay_for_attempt(attempt);
                debug!(delay_ms = delay.as_millis() as u64, "Retrying after delay");
                sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            BridgeError::OperationFailed("All retry attempts exhausted".to_string())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Get),
            reqwest::Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Head),
            reqwest::Method::HEAD
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_exhausts_retries() {
        let client = ReqwestHttpClient::with_timeout(Duration::from_millis(200)).unwrap();
        let policy = RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
            ..RetryPolicy::default()
        };

        let result = client
            .execute_with_retry(HttpRequest::get("http://127.0.0.1:9/picture"), policy)
            .await;

        assert!(matches!(result, Err(BridgeError::OperationFailed(_))));
    }
}
