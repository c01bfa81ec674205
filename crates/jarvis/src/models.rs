//! These models represent the objects passed around by the gateway
//!
//! The same shapes are used on every boundary: the chat history sent by the
//! browser, the messages sent to the completion endpoint and the messages read
//! back from it all follow the OpenAI chat format. Keeping a single wire model
//! lets the caller persist the returned history and send it back untouched.
pub mod message;
pub mod role;
pub mod tool;
