//! Test doubles for the request-execution layer.
//!
//! - [`MockTransport`]: replays a configured response or error and records the
//!   last request it saw

pub mod transport;

pub use transport::MockTransport;
