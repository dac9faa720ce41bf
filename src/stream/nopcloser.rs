//! Reader with a no-op close.

use super::Close;
use bytes::Bytes;
use std::io::{self, Cursor, Read};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Wraps a reader that owns nothing worth releasing, such as an in-memory
/// buffer, so it can be used where a [`Close`] stream is expected.
#[derive(Debug, Clone, Default)]
pub struct NopCloser<R> {
    inner: R,
}

impl<R> NopCloser<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl NopCloser<Cursor<Bytes>> {
    /// In-memory stream over the given bytes.
    pub fn from_bytes<B: Into<Bytes>>(data: B) -> Self {
        Self::new(Cursor::new(data.into()))
    }
}

impl<R> Close for NopCloser<R> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<R: Read> Read for NopCloser<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for NopCloser<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_read(cx, buf)
    }
}
