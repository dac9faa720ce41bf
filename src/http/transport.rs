//! Request-execution capability.
//!
//! The client never talks to the network itself; it hands each request to an
//! [`HttpTransport`]. Swapping the transport is how tests replace real I/O
//! with a [`MockTransport`](crate::mock::MockTransport).

use crate::base::neterror::NetError;
use crate::http::RequestBody;
use http::{Request, Response};
use std::future::Future;

/// Executes a single HTTP request.
pub trait HttpTransport {
    /// Body type of the responses this transport produces.
    type Body;

    /// Send `request` and resolve to the response or the transport failure.
    ///
    /// A transport that produces neither a response nor an error resolves to
    /// [`NetError::EmptyResponse`]; [`MockTransport`](crate::mock::MockTransport)
    /// built with neither configured behaves this way.
    fn round_trip(
        &mut self,
        request: Request<RequestBody>,
    ) -> impl Future<Output = Result<Response<Self::Body>, NetError>>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &mut T {
    type Body = T::Body;

    fn round_trip(
        &mut self,
        request: Request<RequestBody>,
    ) -> impl Future<Output = Result<Response<Self::Body>, NetError>> {
        (**self).round_trip(request)
    }
}
