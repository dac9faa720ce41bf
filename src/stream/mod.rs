//! Readable, closable byte streams.
//!
//! Rust releases resources on drop, but response bodies in tests need an
//! explicit release point that can be observed. This module provides the
//! [`Close`] capability and the types built on it:
//! - [`NopCloser`]: a reader whose close releases nothing
//! - [`CloseDetector`]: a reader that records whether it was closed

pub mod closedetector;
pub mod nopcloser;

pub use closedetector::{CloseDetector, CloseHandle};
pub use nopcloser::NopCloser;

use std::io::{self, Read};
use tokio::io::AsyncRead;

/// A resource that must be released explicitly.
///
/// Calling `close` more than once is allowed by the trait but what a second
/// call does is left to the implementor.
pub trait Close {
    /// Release the resource.
    fn close(&mut self) -> io::Result<()>;
}

impl<T: Close + ?Sized> Close for &mut T {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<T: Close + ?Sized> Close for Box<T> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// A blocking reader that must be closed.
pub trait ReadClose: Read + Close {}

impl<T: Read + Close + ?Sized> ReadClose for T {}

/// An async reader that must be closed.
pub trait AsyncReadClose: AsyncRead + Close {}

impl<T: AsyncRead + Close + ?Sized> AsyncReadClose for T {}
