//! Stream wrapper that records whether `close` was called.
//!
//! What a second `close` does to the underlying resource is up to that
//! resource, so tests cannot probe the inner stream to learn whether it was
//! released. [`CloseDetector`] keeps its own flag instead.

use super::{Close, NopCloser};
use bytes::Bytes;
use parking_lot::Mutex;
use std::io::{self, Cursor, Read};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Wraps a readable, closable stream and tracks whether it has been closed.
///
/// Reads pass through untouched. Every `close` sets the flag and is forwarded
/// to the inner stream; the flag never goes back to `false`.
///
/// Clones share both the inner stream and the flag with the original, for any
/// inner stream type. A clone handed out by a mock transport is the same body
/// as the one the test kept: reads advance the same position and a close
/// through either copy shows up in both.
#[derive(Debug)]
pub struct CloseDetector<R> {
    inner: Arc<Mutex<Option<R>>>,
    closed: Arc<AtomicBool>,
}

impl<R> Clone for CloseDetector<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            closed: Arc::clone(&self.closed),
        }
    }
}

/// Observes the flag of one [`CloseDetector`] after the detector has been
/// moved elsewhere.
#[derive(Debug, Clone)]
pub struct CloseHandle {
    closed: Arc<AtomicBool>,
}

impl CloseHandle {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl<R> CloseDetector<R> {
    /// Wrap an existing stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(inner))),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether `close` has been called at least once.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Handle that keeps reporting this detector's state after it is moved.
    pub fn handle(&self) -> CloseHandle {
        CloseHandle {
            closed: Arc::clone(&self.closed),
        }
    }

    /// Run `f` against the inner stream, `None` once it has been detached.
    pub fn with_inner<T>(&self, f: impl FnOnce(Option<&mut R>) -> T) -> T {
        f(self.inner.lock().as_mut())
    }

    /// Detach the inner stream, leaving this detector and its clones without
    /// one.
    ///
    /// Later reads report end of stream and later closes succeed without
    /// anything to forward to.
    pub fn take_inner(&mut self) -> Option<R> {
        self.inner.lock().take()
    }

    pub fn into_inner(mut self) -> Option<R> {
        self.take_inner()
    }
}

impl CloseDetector<NopCloser<Cursor<Bytes>>> {
    /// Detector over an in-memory copy of `s` whose close releases nothing.
    pub fn from_string<S: Into<String>>(s: S) -> Self {
        Self::new(NopCloser::from_bytes(s.into()))
    }
}

impl From<String> for CloseDetector<NopCloser<Cursor<Bytes>>> {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

impl From<&str> for CloseDetector<NopCloser<Cursor<Bytes>>> {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl<R: Close> Close for CloseDetector<R> {
    fn close(&mut self) -> io::Result<()> {
        let mut inner = self.inner.lock();

        if self.closed.swap(true, Ordering::AcqRel) {
            tracing::trace!("close called on already closed stream");
        } else {
            tracing::debug!(detached = inner.is_none(), "stream closed");
        }

        match inner.as_mut() {
            Some(inner) => inner.close(),
            None => Ok(()),
        }
    }
}

impl<R: Read> Read for CloseDetector<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.lock().as_mut() {
            Some(inner) => inner.read(buf),
            None => Ok(0),
        }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for CloseDetector<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.inner.lock().as_mut() {
            Some(inner) => Pin::new(inner).poll_read(cx, buf),
            None => Poll::Ready(Ok(())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inner stream that counts closes and can be told to fail them.
    struct CountingStream {
        data: Cursor<Vec<u8>>,
        closes: usize,
        fail_close: bool,
    }

    impl CountingStream {
        fn new(data: &[u8]) -> Self {
            Self {
                data: Cursor::new(data.to_vec()),
                closes: 0,
                fail_close: false,
            }
        }
    }

    impl Read for CountingStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.data.read(buf)
        }
    }

    impl Close for CountingStream {
        fn close(&mut self) -> io::Result<()> {
            self.closes += 1;
            if self.fail_close {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "close failed"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_hello_world_scenario() {
        let mut cd = CloseDetector::from_string("hello world");

        let mut out = String::new();
        cd.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello world");

        assert!(!cd.is_closed());
        assert!(cd.close().is_ok());
        assert!(cd.is_closed());
    }

    #[test]
    fn test_every_close_is_forwarded() {
        let mut cd = CloseDetector::new(CountingStream::new(b"x"));
        cd.close().unwrap();
        cd.close().unwrap();
        cd.close().unwrap();

        assert!(cd.is_closed());
        assert_eq!(cd.with_inner(|s| s.map(|s| s.closes)), Some(3));
    }

    #[test]
    fn test_inner_close_error_is_returned_unchanged() {
        let mut inner = CountingStream::new(b"");
        inner.fail_close = true;
        let mut cd = CloseDetector::new(inner);

        let err = cd.close().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(err.to_string(), "close failed");
        // Flag is set even though the inner close failed
        assert!(cd.is_closed());
    }

    #[test]
    fn test_detached_inner() {
        let mut cd = CloseDetector::new(CountingStream::new(b"data"));
        let inner = cd.take_inner().unwrap();
        assert_eq!(inner.closes, 0);

        let mut buf = [0u8; 4];
        assert_eq!(cd.read(&mut buf).unwrap(), 0);

        assert!(cd.close().is_ok());
        assert!(cd.is_closed());
        assert!(cd.into_inner().is_none());
    }

    #[test]
    fn test_clones_share_flag() {
        let original = CloseDetector::from_string("shared");
        let mut clone = original.clone();

        clone.close().unwrap();
        assert!(original.is_closed());
    }

    #[test]
    fn test_clones_share_stream_without_inner_clone() {
        // CountingStream is not Clone
        let mut original = CloseDetector::new(CountingStream::new(b"abcd"));
        let mut clone = original.clone();

        let mut buf = [0u8; 2];
        assert_eq!(clone.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"ab");
        assert_eq!(original.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"cd");

        clone.close().unwrap();
        assert!(original.is_closed());
        assert_eq!(original.with_inner(|s| s.map(|s| s.closes)), Some(1));

        // Detaching through one copy detaches it for all
        assert!(original.take_inner().is_some());
        assert!(clone.with_inner(|s| s.is_none()));
    }

    #[test]
    fn test_handle_outlives_detector() {
        let mut cd: CloseDetector<NopCloser<Cursor<Bytes>>> = "moved".into();
        let handle = cd.handle();
        assert!(!handle.is_closed());

        cd.close().unwrap();
        drop(cd);
        assert!(handle.is_closed());
    }

    #[test]
    fn test_drop_without_close_is_not_closed() {
        let cd: CloseDetector<NopCloser<Cursor<Bytes>>> = String::from("leaked").into();
        let handle = cd.handle();
        drop(cd);
        assert!(!handle.is_closed());
    }
}
