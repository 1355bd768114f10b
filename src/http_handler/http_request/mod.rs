pub mod chat_post;
pub mod request_common;
