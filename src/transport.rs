use reqwest::blocking::Client as ReqwestClient;
use std::time::Duration;

use crate::error::Error;

/// A single outgoing POST request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Fully built target URL
    pub url: String,
    /// Header name/value pairs, sent in order
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Vec<u8>,
    /// Time allowed for the whole exchange
    pub timeout: Duration,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response as received from the wire
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

/// The HTTP capability a [`Client`](crate::Client) sends its calls through
///
/// Implementations must return `Error::Transport` when no complete response
/// arrives, whether because of the timeout or a lower-level failure. Any
/// response that did arrive, whatever its status, is returned as `Ok`.
pub trait HttpTransport: Send + Sync {
    /// Send a POST request and wait for its response
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error>;
}

/// Blocking transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Create a transport whose connection phase is bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = ReqwestClient::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ReqwestTransport { client })
    }

    /// Wrap an existing `reqwest` blocking client
    pub fn from_client(client: ReqwestClient) -> Self {
        ReqwestTransport { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let mut builder = self
            .client
            .post(&request.url)
            .timeout(request.timeout)
            .body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(map_reqwest_error)?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> Error {
    // reqwest includes the full URL, token and all, in its Display output
    let err = err.without_url();
    if err.is_timeout() {
        Error::timeout(err.to_string())
    } else {
        Error::transport(err.to_string())
    }
}
