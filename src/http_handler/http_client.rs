use crate::http_handler::http_request::chat_post::ChatRequest;
use crate::http_handler::http_request::request_common::JSONBodyHTTPRequestType;
use crate::planner::{Advisor, AdvisoryError};
use async_trait::async_trait;

/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL and default settings.
///
/// This client is used for REST calls to the advisory backend. It sets a
/// fixed timeout and allows easy reuse of the HTTP client infrastructure.
#[derive(Debug)]
pub(crate) struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the API, prepended to all endpoint paths.
    base_url: String,
}

impl HTTPClient {
    /// Request timeout, kept above the planner's own advisory deadline.
    const TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

    /// Constructs a new `HTTPClient` with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` – The root URL for all HTTP requests (e.g., `"https://api.cohere.com"`).
    ///
    /// # Returns
    /// A configured `HTTPClient` instance.
    pub(crate) fn new(base_url: &str) -> HTTPClient {
        HTTPClient {
            client: reqwest::Client::builder().timeout(Self::TIMEOUT).build().unwrap(),
            base_url: String::from(base_url),
        }
    }

    /// Returns a reference to the internal `reqwest::Client`.
    pub(super) fn client(&self) -> &reqwest::Client { &self.client }
    /// Returns the base URL that the client was initialized with.
    pub(crate) fn url(&self) -> &str { self.base_url.as_str() }
}

/// Remote advisor backed by the chat completion API.
pub(crate) struct AdvisoryClient {
    client: HTTPClient,
    api_key: String,
    model: String,
}

impl AdvisoryClient {
    pub(crate) fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: HTTPClient::new(base_url),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    pub(crate) fn model(&self) -> &str { &self.model }
}

#[async_trait]
impl Advisor for AdvisoryClient {
    async fn request_verdict(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let request = ChatRequest::new(&self.model, prompt, &self.api_key);
        let response = request
            .send_request(&self.client)
            .await
            .map_err(|e| AdvisoryError::Unreachable(e.to_string()))?;
        response
            .reply_text()
            .map(str::to_string)
            .ok_or_else(|| AdvisoryError::MalformedReply("reply holds no text block".to_string()))
    }
}
