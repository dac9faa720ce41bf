//! Base types and error handling.
//!
//! - [`NetError`]: Network error codes in the Chromium `net_error_list.h` style

pub mod neterror;

pub use neterror::NetError;
