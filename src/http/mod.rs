pub mod requestbody;
pub mod responsebody;
pub mod transport;

// Re-exports for convenience
pub use requestbody::RequestBody;
pub use responsebody::ResponseBody;
pub use transport::HttpTransport;
