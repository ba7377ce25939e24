//! Request pipeline: session tagging, visitor logging, response headers.
//!
//! Layers are attached in [`crate::api::build_app`]; handlers only ever
//! see the per-request [`SessionId`] extension.

pub mod headers;
pub mod session;
pub mod visitor;

pub use session::{SESSION_HEADER, SessionId, session_middleware};
pub use visitor::{is_bot, visitor_log_middleware};
