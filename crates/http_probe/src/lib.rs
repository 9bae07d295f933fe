//! # HTTP Probe
//!
//! This crate checks whether a remote HTTP endpoint is up by speaking just enough
//! HTTP/1.1 over a raw TCP socket to read the status line of the response.
//! It does not follow redirects or negotiate TLS.

/// The raw-socket prober that issues requests and classifies the result.
pub mod prober;
/// Targets, status lines and probe errors.
pub mod types;

pub use prober::{HttpProber, RESPONSE_BUDGET};
pub use types::{ProbeError, StatusLine, Target, UP_STATUS_CODES};
