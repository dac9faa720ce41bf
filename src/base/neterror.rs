use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum NetError {
    /// Generic failure with a caller-supplied description, for failures that
    /// have no dedicated code.
    #[error("{0}")]
    Failed(&'static str),

    // Connection Errors
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection reset (TCP RST)")]
    ConnectionReset,
    #[error("Connection refused")]
    ConnectionRefused,
    #[error("Connection aborted")]
    ConnectionAborted,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Internet disconnected")]
    InternetDisconnected,
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Address unreachable")]
    AddressUnreachable,
    #[error("Connection timed out")]
    ConnectionTimedOut,
    #[error("Proxy connection failed")]
    ProxyConnectionFailed,

    // HTTP Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Unknown URL scheme")]
    UnknownUrlScheme,
    #[error("Too many redirects")]
    TooManyRedirects,
    #[error("Invalid response")]
    InvalidResponse,
    #[error("Method not supported")]
    MethodNotSupported,
    #[error("Empty response")]
    EmptyResponse,
    #[error("Response headers too big")]
    ResponseHeadersTooBig,
    #[error("Content decoding failed")]
    ContentDecodingFailed,
    #[error("Content-Length mismatch")]
    ContentLengthMismatch,
    #[error("Invalid HTTP response")]
    InvalidHttpResponse,

    // Body and request construction errors (custom codes starting at -900)
    #[error("Invalid header")]
    InvalidHeader,
    #[error("HTTP body error")]
    HttpBodyError,
    #[error("Invalid UTF-8 in body")]
    InvalidUtf8,
    #[error("JSON parse error")]
    JsonParseError,

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::Failed(_) => -2,
            NetError::ConnectionClosed => -100,
            NetError::ConnectionReset => -101,
            NetError::ConnectionRefused => -102,
            NetError::ConnectionAborted => -103,
            NetError::ConnectionFailed => -104,
            NetError::NameNotResolved => -105,
            NetError::InternetDisconnected => -106,
            NetError::SslProtocolError => -107,
            NetError::AddressUnreachable => -109,
            NetError::ConnectionTimedOut => -118,
            NetError::ProxyConnectionFailed => -130,

            NetError::InvalidUrl => -300,
            NetError::UnknownUrlScheme => -302,
            NetError::TooManyRedirects => -310,
            NetError::InvalidResponse => -320,
            NetError::MethodNotSupported => -322,
            NetError::EmptyResponse => -324,
            NetError::ResponseHeadersTooBig => -325,
            NetError::ContentDecodingFailed => -330,
            NetError::ContentLengthMismatch => -354,
            NetError::InvalidHttpResponse => -370,

            NetError::InvalidHeader => -900,
            NetError::HttpBodyError => -901,
            NetError::InvalidUtf8 => -902,
            NetError::JsonParseError => -903,
            NetError::Unknown(code) => *code,
        }
    }

    /// Whether the error originates below HTTP, in connection setup or I/O.
    pub fn is_connection_error(&self) -> bool {
        (-199..=-100).contains(&self.as_i32())
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -2 => NetError::Failed("Generic failure"),
            -100 => NetError::ConnectionClosed,
            -101 => NetError::ConnectionReset,
            -102 => NetError::ConnectionRefused,
            -103 => NetError::ConnectionAborted,
            -104 => NetError::ConnectionFailed,
            -105 => NetError::NameNotResolved,
            -106 => NetError::InternetDisconnected,
            -107 => NetError::SslProtocolError,
            -109 => NetError::AddressUnreachable,
            -118 => NetError::ConnectionTimedOut,
            -130 => NetError::ProxyConnectionFailed,

            -300 => NetError::InvalidUrl,
            -302 => NetError::UnknownUrlScheme,
            -310 => NetError::TooManyRedirects,
            -320 => NetError::InvalidResponse,
            -322 => NetError::MethodNotSupported,
            -324 => NetError::EmptyResponse,
            -325 => NetError::ResponseHeadersTooBig,
            -330 => NetError::ContentDecodingFailed,
            -354 => NetError::ContentLengthMismatch,
            -370 => NetError::InvalidHttpResponse,

            -900 => NetError::InvalidHeader,
            -901 => NetError::HttpBodyError,
            -902 => NetError::InvalidUtf8,
            -903 => NetError::JsonParseError,
            _ => NetError::Unknown(code),
        }
    }
}
