//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, explicit route table)
//!     → request.rs (request ID middleware)
//!     → [upstream client fetches the target]
//!     → response.rs (CORS headers, relay or error body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer, PROXY_PATH};
