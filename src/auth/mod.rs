//! Authentication module
//!
//! The IDR service authenticates every request with three fixed headers
//! carrying the API key, organization and username.

mod credentials;

pub use credentials::{Credentials, HEADER_API_KEY, HEADER_API_ORG, HEADER_API_USER};
