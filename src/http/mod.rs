//! HTTP client module
//!
//! One authenticated request per call against the configured IDR URL.
//! There are no retries: connection failures, timeouts and error statuses
//! are all reported through [`crate::Error::Idr`].

mod client;

pub use client::{read_json, HttpClient, RequestConfig};
