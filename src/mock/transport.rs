//! Spy transport that replays a configured outcome.

use crate::base::neterror::NetError;
use crate::http::{HttpTransport, RequestBody};
use bytes::Bytes;
use futures::future;
use http::{Request, Response};
use std::future::Future;

/// Transport that performs no I/O.
///
/// Built with the response and/or error to hand back. Every round trip
/// overwrites the recorded request and resolves to the configured outcome:
/// the error if one is set, otherwise a clone of the response. With neither
/// configured the round trip fails with [`NetError::EmptyResponse`].
///
/// Only the latest request is kept; there is no history.
///
/// Every call hands out a clone of the configured response. For a
/// [`CloseDetector`](crate::stream::CloseDetector) body that clone is the same
/// stream, whatever the inner stream type.
#[derive(Debug)]
pub struct MockTransport<B = Bytes> {
    response: Option<Response<B>>,
    error: Option<NetError>,
    last_request: Option<Request<RequestBody>>,
}

impl<B> Default for MockTransport<B> {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl<B> MockTransport<B> {
    /// Create a transport with the given outcome. Nothing is validated.
    pub fn new(response: Option<Response<B>>, error: Option<NetError>) -> Self {
        Self {
            response,
            error,
            last_request: None,
        }
    }

    /// Transport that always answers with `response`.
    pub fn with_response(response: Response<B>) -> Self {
        Self::new(Some(response), None)
    }

    /// Transport that always fails with `error`.
    pub fn with_error(error: NetError) -> Self {
        Self::new(None, Some(error))
    }

    pub fn response(&self) -> Option<&Response<B>> {
        self.response.as_ref()
    }

    pub fn error(&self) -> Option<NetError> {
        self.error
    }

    /// The request passed to the most recent round trip, if any.
    pub fn last_request(&self) -> Option<&Request<RequestBody>> {
        self.last_request.as_ref()
    }

    /// Move the recorded request out.
    pub fn take_last_request(&mut self) -> Option<Request<RequestBody>> {
        self.last_request.take()
    }

    fn outcome(&self) -> Result<Response<B>, NetError>
    where
        B: Clone,
    {
        match (self.error, &self.response) {
            (Some(err), _) => Err(err),
            (None, Some(response)) => Ok(response.clone()),
            (None, None) => Err(NetError::EmptyResponse),
        }
    }
}

impl<B: Clone> HttpTransport for MockTransport<B> {
    type Body = B;

    fn round_trip(
        &mut self,
        request: Request<RequestBody>,
    ) -> impl Future<Output = Result<Response<B>, NetError>> {
        tracing::debug!(
            method = %request.method(),
            uri = %request.uri(),
            body_len = request.body().len(),
            "mock transport round trip"
        );
        self.last_request = Some(request);
        future::ready(self.outcome())
    }
}
