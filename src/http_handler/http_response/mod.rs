pub mod chat;
pub mod response_common;
