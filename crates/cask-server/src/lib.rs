//! HTTP transport for the Cask blob gateway.
//!
//! Decodes requests into (key, operation, payload) tuples, hands them to the
//! gateway, and translates gateway error kinds into protocol status codes.
//! Empty keys and unreadable upload payloads are rejected here, before the
//! concurrency core is involved.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use server::CaskServer;
