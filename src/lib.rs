//! # spynet
//!
//! Test doubles for code that issues outbound HTTP requests.
//!
//! `spynet` lets a test replace the network with a transport that hands back
//! a canned response or error, and check afterwards both what was sent and
//! whether the response body was released.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spynet::{Client, CloseDetector, MockTransport, ResponseBody};
//!
//! #[tokio::test]
//! async fn fetch_closes_body() {
//!     let body = CloseDetector::from_string("hello world");
//!     let closed = body.handle();
//!     let transport = MockTransport::with_response(http::Response::new(body));
//!
//!     let mut client = Client::new(transport);
//!     let resp = client.get("https://example.com").send().await.unwrap();
//!     let text = ResponseBody::from_response(resp).text().await.unwrap();
//!
//!     assert_eq!(text, "hello world");
//!     assert!(closed.is_closed());
//!     let sent = client.transport().last_request().unwrap();
//!     assert_eq!(sent.uri(), "https://example.com/");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`client`] - Request builder over an injected transport
//! - [`http`] - Transport capability, request and response bodies
//! - [`mock`] - Spy transport
//! - [`stream`] - Closable streams and the close detector

pub mod base;
pub mod client;
pub mod http;
pub mod mock;
pub mod stream;

pub use base::NetError;
pub use client::Client;
pub use crate::http::{HttpTransport, RequestBody, ResponseBody};
pub use mock::MockTransport;
pub use stream::{Close, CloseDetector, CloseHandle, NopCloser};
