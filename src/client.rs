//! HTTP Client with builder pattern.
//!
//! The client builds requests and hands them to an injected
//! [`HttpTransport`]. It performs no I/O of its own, which is what lets a
//! [`MockTransport`](crate::mock::MockTransport) stand in for the network.
//!
//! # Example
//!
//! ```rust,ignore
//! use spynet::{Client, MockTransport};
//!
//! let mut client = Client::builder(MockTransport::with_response(response))
//!     .user_agent("my-app/1.0")
//!     .build();
//!
//! let resp = client.get("https://example.com")
//!     .send()
//!     .await?;
//! ```

use crate::base::neterror::NetError;
use crate::http::{HttpTransport, RequestBody};
use http::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use http::{Method, Request, Response};
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("spynet/", env!("CARGO_PKG_VERSION"));

/// HTTP Client that sends requests through a transport.
///
/// Use [`Client::builder()`] to configure default headers.
pub struct Client<T> {
    transport: T,
    default_headers: HeaderMap,
}

impl<T: HttpTransport> Client<T> {
    /// Create a client over `transport` with default settings.
    pub fn new(transport: T) -> Self {
        Self::builder(transport).build()
    }

    /// Create a new client builder.
    pub fn builder(transport: T) -> ClientBuilder<T> {
        ClientBuilder {
            transport,
            default_headers: HeaderMap::new(),
            user_agent: None,
            error: None,
        }
    }

    /// Start building a GET request.
    pub fn get<U: AsRef<str>>(&mut self, url: U) -> RequestBuilder<'_, T> {
        self.request(Method::GET, url)
    }

    /// Start building a POST request.
    pub fn post<U: AsRef<str>>(&mut self, url: U) -> RequestBuilder<'_, T> {
        self.request(Method::POST, url)
    }

    /// Start building a PUT request.
    pub fn put<U: AsRef<str>>(&mut self, url: U) -> RequestBuilder<'_, T> {
        self.request(Method::PUT, url)
    }

    /// Start building a DELETE request.
    pub fn delete<U: AsRef<str>>(&mut self, url: U) -> RequestBuilder<'_, T> {
        self.request(Method::DELETE, url)
    }

    /// Start building a HEAD request.
    pub fn head<U: AsRef<str>>(&mut self, url: U) -> RequestBuilder<'_, T> {
        self.request(Method::HEAD, url)
    }

    /// Start building a PATCH request.
    pub fn patch<U: AsRef<str>>(&mut self, url: U) -> RequestBuilder<'_, T> {
        self.request(Method::PATCH, url)
    }

    /// Start building a request with custom method.
    pub fn request<U: AsRef<str>>(&mut self, method: Method, url: U) -> RequestBuilder<'_, T> {
        RequestBuilder {
            client: self,
            method,
            url: url.as_ref().to_string(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            error: None,
        }
    }

    /// Send a fully built request as-is. Default headers are not applied.
    pub async fn execute(
        &mut self,
        request: Request<RequestBody>,
    ) -> Result<Response<T::Body>, NetError> {
        tracing::debug!(method = %request.method(), uri = %request.uri(), "sending request");
        let result = self.transport.round_trip(request).await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, code = e.as_i32(), "transport failed");
        }
        result
    }

    /// Headers added to every request built by this client.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

/// Builder for creating a [`Client`].
pub struct ClientBuilder<T> {
    transport: T,
    default_headers: HeaderMap,
    user_agent: Option<HeaderValue>,
    error: Option<NetError>,
}

impl<T: HttpTransport> ClientBuilder<T> {
    /// Add a header sent with every request.
    pub fn default_header<K, V>(mut self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        HeaderValue: TryFrom<V>,
    {
        match parse_header(key, value) {
            Ok((name, value)) => {
                self.default_headers.append(name, value);
            }
            Err(e) => {
                self.error = self.error.or(Some(e));
            }
        }
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent<V>(mut self, value: V) -> Self
    where
        HeaderValue: TryFrom<V>,
    {
        match HeaderValue::try_from(value) {
            Ok(v) => self.user_agent = Some(v),
            Err(_) => {
                self.error = self.error.or(Some(NetError::InvalidHeader));
            }
        }
        self
    }

    /// Build the client.
    ///
    /// An invalid default header is dropped with a warning; the client is
    /// still usable.
    pub fn build(self) -> Client<T> {
        if let Some(e) = self.error {
            tracing::warn!(error = %e, "ignoring invalid default header");
        }

        let mut default_headers = self.default_headers;
        match self.user_agent {
            Some(ua) => {
                default_headers.insert(USER_AGENT, ua);
            }
            None if !default_headers.contains_key(USER_AGENT) => {
                default_headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
            }
            None => {}
        }

        Client {
            transport: self.transport,
            default_headers,
        }
    }
}

/// Builder for a single request.
pub struct RequestBuilder<'a, T> {
    client: &'a mut Client<T>,
    method: Method,
    url: String,
    headers: HeaderMap,
    body: RequestBody,
    error: Option<NetError>,
}

impl<T: HttpTransport> RequestBuilder<'_, T> {
    /// Add a header. Headers set here replace default headers of the same
    /// name.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        HeaderValue: TryFrom<V>,
    {
        match parse_header(key, value) {
            Ok((name, value)) => {
                self.headers.append(name, value);
            }
            Err(e) => {
                self.error = self.error.or(Some(e));
            }
        }
        self
    }

    /// Set request body.
    pub fn body<B: Into<RequestBody>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    /// Set JSON body.
    #[cfg(feature = "json")]
    pub fn json<J: serde::Serialize>(mut self, json: &J) -> Self {
        match serde_json::to_vec(json) {
            Ok(bytes) => {
                self.body = bytes.into();
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
            }
            Err(_) => {
                self.error = self.error.or(Some(NetError::JsonParseError));
            }
        }
        self
    }

    /// Send the request.
    pub async fn send(self) -> Result<Response<T::Body>, NetError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let url = Url::parse(&self.url).map_err(|_| NetError::InvalidUrl)?;

        let mut headers = self.client.default_headers.clone();
        for name in self.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in self.headers.iter() {
            headers.append(name, value.clone());
        }

        let mut request = Request::builder()
            .method(self.method)
            .uri(url.as_str())
            .body(self.body)
            .map_err(|_| NetError::InvalidUrl)?;
        *request.headers_mut() = headers;

        self.client.execute(request).await
    }
}

fn parse_header<K, V>(key: K, value: V) -> Result<(HeaderName, HeaderValue), NetError>
where
    HeaderName: TryFrom<K>,
    HeaderValue: TryFrom<V>,
{
    let name = HeaderName::try_from(key).map_err(|_| NetError::InvalidHeader)?;
    let value = HeaderValue::try_from(value).map_err(|_| NetError::InvalidHeader)?;
    Ok((name, value))
}
