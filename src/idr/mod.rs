//! IDR endpoint operations
//!
//! [`IdrClient`] maps each IDR operation onto the transport or the
//! paginator:
//!
//! | Operation   | Request                       |
//! |-------------|-------------------------------|
//! | `reserve`   | `POST cve-id`                 |
//! | `show_cve`  | `GET cve-id/{id}`             |
//! | `list_cves` | `GET cve-id` (paged)          |
//! | `quota`     | `GET org/{org}/id_quota`      |
//! | `ping`      | `GET health-check`            |

mod types;

pub use types::{BatchType, CveListFilter, ReserveRequest};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{paginate, ItemStream, PageRequest};
use reqwest::{Method, Response};
use tracing::info;

/// Path of the CVE ID collection
const CVE_ID_PATH: &str = "cve-id";

/// Field holding the items of a CVE ID listing
const CVE_IDS_FIELD: &str = "cve_ids";

/// Client for the IDR service
#[derive(Debug, Clone)]
pub struct IdrClient {
    http: HttpClient,
}

impl IdrClient {
    /// Create a client from a validated config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Create a client from the `CVE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// Underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Organization the client authenticates as
    pub fn org(&self) -> &str {
        self.http.credentials().org()
    }

    /// Reserve `count` CVE IDs for `year` on behalf of `owning_cna`
    pub async fn reserve(
        &self,
        count: u32,
        random: bool,
        year: i32,
        owning_cna: &str,
    ) -> Result<Response> {
        self.reserve_with(&ReserveRequest::new(count, random, year, owning_cna))
            .await
    }

    /// Reserve CVE IDs described by `request`
    pub async fn reserve_with(&self, request: &ReserveRequest) -> Result<Response> {
        if request.count == 0 {
            return Err(Error::invalid_argument(
                "number of CVE IDs to reserve must be at least 1",
            ));
        }

        info!(
            "Reserving {} CVE ID(s) for {} owned by {}",
            request.count, request.year, request.owning_cna
        );
        self.http
            .post(CVE_ID_PATH, RequestConfig::with_query(request.to_params()))
            .await
    }

    /// Fetch a single CVE ID record
    ///
    /// The ID is sent as a single percent-encoded path segment, so `/`, `?`
    /// and `#` in it never change which endpoint is hit.
    pub async fn show_cve(&self, cve_id: &str) -> Result<Response> {
        if matches!(cve_id.trim(), "" | "." | "..") {
            return Err(Error::invalid_argument(format!("invalid CVE ID: {cve_id:?}")));
        }
        let url = self.http.build_segment_url(&[CVE_ID_PATH, cve_id])?;
        self.http
            .request_url(Method::GET, url, RequestConfig::new())
            .await
    }

    /// Stream every CVE ID record matching `filter`, following pagination
    pub fn list_cves(&self, filter: &CveListFilter) -> ItemStream<'_> {
        let request = PageRequest::new(CVE_ID_PATH, CVE_IDS_FIELD, filter.to_params());
        paginate(&self.http, request)
    }

    /// Fetch the organization's CVE ID quota
    pub async fn quota(&self) -> Result<Response> {
        let url = self
            .http
            .build_segment_url(&["org", self.org(), "id_quota"])?;
        self.http
            .request_url(Method::GET, url, RequestConfig::new())
            .await
    }

    /// Check that the service is reachable
    pub async fn ping(&self) -> Result<Response> {
        self.http.get("health-check", RequestConfig::new()).await
    }
}

#[cfg(test)]
mod tests;
