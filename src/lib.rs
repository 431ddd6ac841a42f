//! # cvelib
//!
//! Client library for the CVE ID registration service (IDR).
//!
//! ## Features
//!
//! - **Authenticated transport**: API key, organization and user headers on
//!   every request, fixed 60 second timeout
//! - **Lazy pagination**: list endpoints are exposed as streams that fetch
//!   the next page only when the current one has been consumed
//! - **Configurable error handling**: error statuses either become
//!   [`Error::Idr`] or are returned to the caller untouched
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cvelib::{ClientConfig, CveListFilter, IdrClient, Result};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder()
//!         .environment("dev")
//!         .username("user@example.com")
//!         .org("example")
//!         .api_key("...")
//!         .build()?;
//!     let client = IdrClient::new(&config)?;
//!
//!     let mut ids = client.list_cves(&CveListFilter::new().state("reserved"));
//!     while let Some(id) = ids.try_next().await? {
//!         println!("{}", id["cve_id"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        IdrClient                          │
//! │  reserve()  show_cve()  list_cves()  quota()  ping()      │
//! └───────────────────────────────────────────────────────────┘
//!              │                          │
//!              │                  ┌───────┴───────┐
//!              │                  │   Paginator   │
//!              │                  │ nextPage loop │
//!              │                  └───────┬───────┘
//! ┌────────────┴──────────────────────────┴───────────────────┐
//! │           HttpClient (one request per call)               │
//! │       Credentials · URL join · error policy               │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Client configuration and environment resolution
pub mod config;

/// Authentication headers
pub mod auth;

/// Authenticated HTTP transport
pub mod http;

/// `nextPage` pagination
pub mod pagination;

/// IDR endpoint operations
pub mod idr;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ClientConfig, Environment, ErrorPolicy};
pub use error::{Error, Result};
pub use idr::{BatchType, CveListFilter, IdrClient, ReserveRequest};
pub use pagination::ItemStream;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
