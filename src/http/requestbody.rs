//! Request body recorded by transports.

use bytes::Bytes;

/// Payload of an outgoing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body (GET, HEAD, DELETE).
    #[default]
    Empty,
    /// Body with raw bytes.
    Bytes(Bytes),
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        RequestBody::Bytes(Bytes::from(s))
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(v: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(v))
    }
}

impl From<&str> for RequestBody {
    fn from(s: &str) -> Self {
        RequestBody::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<&[u8]> for RequestBody {
    fn from(b: &[u8]) -> Self {
        RequestBody::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Bytes> for RequestBody {
    fn from(b: Bytes) -> Self {
        RequestBody::Bytes(b)
    }
}

impl RequestBody {
    /// Check if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the length of the body in bytes.
    pub fn len(&self) -> usize {
        match self {
            RequestBody::Empty => 0,
            RequestBody::Bytes(b) => b.len(),
        }
    }

    /// Borrow the payload; empty for [`RequestBody::Empty`].
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RequestBody::Empty => &[],
            RequestBody::Bytes(b) => b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body() {
        let body = RequestBody::Empty;
        assert!(body.is_empty());
        assert_eq!(body.len(), 0);
        assert!(body.as_bytes().is_empty());
    }

    #[test]
    fn test_bytes_body() {
        let body = RequestBody::Bytes(Bytes::from("hello"));
        assert!(!body.is_empty());
        assert_eq!(body.len(), 5);
        assert_eq!(body.as_bytes(), b"hello");
    }

    #[test]
    fn test_zero_length_bytes_is_empty() {
        let body = RequestBody::Bytes(Bytes::new());
        assert!(body.is_empty());
    }

    #[test]
    fn test_conversions() {
        let b1: RequestBody = "hello world".to_string().into();
        assert_eq!(b1.len(), 11);

        let b2: RequestBody = "test".into();
        assert_eq!(b2.len(), 4);

        let b3: RequestBody = vec![1u8, 2, 3, 4].into();
        assert_eq!(b3.len(), 4);

        let b4: RequestBody = Bytes::from_static(b"raw").into();
        assert_eq!(b4.len(), 3);

        let b5: RequestBody = b"slice".as_slice().into();
        assert_eq!(b5.as_bytes(), b"slice");
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(RequestBody::default(), RequestBody::Empty);
    }
}
