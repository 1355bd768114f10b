use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};
use crate::http_handler::http_response::chat::ChatResponse;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Request type for the advisory /v2/chat endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct ChatRequest {
    /// Model the advisory call is answered by.
    model: String,
    /// Single-turn conversation holding the full prompt.
    messages: Vec<ChatMessage>,
    temperature: f64,
    response_format: ResponseFormat,
    #[serde(skip)]
    bearer_token: String,
}

#[derive(serde::Serialize, Debug)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(serde::Serialize, Debug)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

impl ChatRequest {
    /// Sampling temperature for advisory calls.
    const TEMPERATURE: f64 = 0.5;

    pub(crate) fn new(model: &str, prompt: &str, bearer_token: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage { role: "user", content: prompt.to_string() }],
            temperature: Self::TEMPERATURE,
            response_format: ResponseFormat { format_type: "json_object" },
            bearer_token: bearer_token.to_string(),
        }
    }
}

impl JSONBodyHTTPRequestType for ChatRequest {
    /// The type of the json body.
    type Body = ChatRequest;
    /// Returns the serializable object.
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for ChatRequest {
    /// Type of the expected response.
    type Response = ChatResponse;
    /// `str` object representing the specific endpoint.
    fn endpoint(&self) -> &'static str { "/v2/chat" }
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
    /// Bearer authentication for the advisory API.
    fn header_params(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.bearer_token)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }
}
