//! Upstream fetch subsystem.
//!
//! # Data Flow
//! ```text
//! target URL (caller-supplied string)
//!     → client.rs (GET with Basic auth + Accept: */*)
//!     → bounded by configured timeout
//!     → full body read into memory
//!     → Bytes back to the HTTP handler, or a typed UpstreamError
//! ```
//!
//! # Design Decisions
//! - Exactly one outbound call per inbound request; no retries
//! - Failures are values (UpstreamError), not exceptions; the HTTP
//!   boundary maps every variant to 502
//! - The Basic-auth token is computed once at startup, not per request

pub mod client;

pub use client::basic_auth_token;
pub use client::UpstreamClient;
pub use client::UpstreamError;
