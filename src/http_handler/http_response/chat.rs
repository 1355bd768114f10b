use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

/// Reply of the advisory /v2/chat endpoint.
#[derive(serde::Deserialize, Debug)]
pub(crate) struct ChatResponse {
    message: AssistantMessage,
}

#[derive(serde::Deserialize, Debug)]
struct AssistantMessage {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(serde::Deserialize, Debug)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    block_type: String,
    #[serde(default)]
    text: String,
}

impl SerdeJSONBodyHTTPResponseType for ChatResponse {}

impl ChatResponse {
    /// The first text block of the assistant turn, if the reply holds one.
    pub(crate) fn reply_text(&self) -> Option<&str> {
        self.message
            .content
            .iter()
            .find(|block| block.block_type == "text")
            .map(|block| block.text.as_str())
    }
}
