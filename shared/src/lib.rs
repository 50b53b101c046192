//! Shared types for the smart-menu backend
//!
//! Domain models, request/response types, the unified error system and
//! notification payloads used by the server crate and by external
//! transport layers.

pub mod error;
pub mod message;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use message::MenuEvent;
