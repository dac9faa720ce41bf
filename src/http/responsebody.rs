//! Response body consumption.
//!
//! Whoever reads a response body is responsible for closing it. Every
//! consuming method on [`ResponseBody`] closes the stream once, including when
//! reading fails partway.

use crate::base::neterror::NetError;
use crate::stream::Close;
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Response body wrapper over a readable, closable stream.
pub struct ResponseBody<R> {
    inner: R,
}

impl<R> ResponseBody<R>
where
    R: AsyncRead + Close + Unpin,
{
    /// Create a new response body wrapper.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Take the body out of a response, dropping the head.
    pub fn from_response(response: http::Response<R>) -> Self {
        Self::new(response.into_body())
    }

    /// Read entire body as bytes, then close it.
    pub async fn bytes(mut self) -> Result<Bytes, NetError> {
        let mut buf = Vec::new();
        let read = self.inner.read_to_end(&mut buf).await;
        let closed = self.inner.close();

        if let Err(e) = read {
            tracing::debug!(error = %e, "response body read failed");
            return Err(NetError::HttpBodyError);
        }
        if let Err(e) = closed {
            tracing::debug!(error = %e, "response body close failed");
            return Err(NetError::HttpBodyError);
        }
        Ok(Bytes::from(buf))
    }

    /// Read body as UTF-8 string.
    pub async fn text(self) -> Result<String, NetError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|_| NetError::InvalidUtf8)
    }

    /// Read body as JSON, deserializing to type T.
    #[cfg(feature = "json")]
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> Result<T, NetError> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|_| NetError::JsonParseError)
    }

    /// Close the body without reading it.
    pub fn discard(mut self) -> Result<(), NetError> {
        self.inner.close().map_err(|e| {
            tracing::debug!(error = %e, "response body close failed");
            NetError::HttpBodyError
        })
    }

    /// Get the inner stream for low-level access. The caller takes over
    /// closing it.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::CloseDetector;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    /// Reader that fails on first read.
    struct BrokenReader;

    impl AsyncRead for BrokenReader {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")))
        }
    }

    impl Close for BrokenReader {
        fn close(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_text_closes_body() {
        let body = CloseDetector::from_string("hello world");
        let handle = body.handle();

        let text = ResponseBody::new(body).text().await.unwrap();
        assert_eq!(text, "hello world");
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn test_read_error_still_closes() {
        let body = CloseDetector::new(BrokenReader);
        let handle = body.handle();

        let err = ResponseBody::new(body).bytes().await.unwrap_err();
        assert_eq!(err, NetError::HttpBodyError);
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let body = CloseDetector::new(crate::stream::NopCloser::from_bytes(vec![0xffu8, 0xfe]));
        let handle = body.handle();

        let err = ResponseBody::new(body).text().await.unwrap_err();
        assert_eq!(err, NetError::InvalidUtf8);
        assert!(handle.is_closed());
    }

    #[test]
    fn test_discard_closes() {
        let body = CloseDetector::from_string("unread");
        let handle = body.handle();

        ResponseBody::new(body).discard().unwrap();
        assert!(handle.is_closed());
    }

    #[test]
    fn test_into_inner_leaves_body_open() {
        let body = CloseDetector::from_string("raw");
        let inner = ResponseBody::new(body).into_inner();
        assert!(!inner.is_closed());
    }
}
