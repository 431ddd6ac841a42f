//! Request shaping for IDR endpoints

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// Allocation order for multi-ID reservations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchType {
    /// Consecutive IDs
    Sequential,
    /// IDs scattered across the year's range
    Nonsequential,
}

impl BatchType {
    /// Batch type for a random or sequential request
    pub fn from_random(random: bool) -> Self {
        if random {
            Self::Nonsequential
        } else {
            Self::Sequential
        }
    }

    /// Wire value of the batch type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Nonsequential => "nonsequential",
        }
    }
}

impl fmt::Display for BatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a CVE ID reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveRequest {
    /// Number of IDs to reserve
    pub count: u32,
    /// Non-sequential allocation; only meaningful when `count > 1`
    pub random: bool,
    /// Year the IDs are reserved for
    pub year: i32,
    /// Short name of the CNA that will own the IDs
    pub owning_cna: String,
}

impl ReserveRequest {
    /// Create a new reservation request
    pub fn new(count: u32, random: bool, year: i32, owning_cna: impl Into<String>) -> Self {
        Self {
            count,
            random,
            year,
            owning_cna: owning_cna.into(),
        }
    }

    /// Batch type sent with the request, if any
    pub fn batch_type(&self) -> Option<BatchType> {
        (self.count > 1).then(|| BatchType::from_random(self.random))
    }

    /// Query parameters of the reservation
    pub fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("cve_year".to_string(), self.year.to_string());
        params.insert("amount".to_string(), self.count.to_string());
        params.insert("short_name".to_string(), self.owning_cna.clone());
        if let Some(batch_type) = self.batch_type() {
            params.insert("batch_type".to_string(), batch_type.to_string());
        }
        params
    }
}

/// Optional filters of a CVE ID listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CveListFilter {
    /// Only IDs of this year
    pub year: Option<i32>,
    /// Only IDs in this state (sent upper-cased)
    pub state: Option<String>,
    /// Only IDs reserved before this time
    pub reserved_lt: Option<DateTime<Utc>>,
    /// Only IDs reserved after this time
    pub reserved_gt: Option<DateTime<Utc>>,
}

impl CveListFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by year
    #[must_use]
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Filter by state
    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Filter by reservation time upper bound
    #[must_use]
    pub fn reserved_before(mut self, time: DateTime<Utc>) -> Self {
        self.reserved_lt = Some(time);
        self
    }

    /// Filter by reservation time lower bound
    #[must_use]
    pub fn reserved_after(mut self, time: DateTime<Utc>) -> Self {
        self.reserved_gt = Some(time);
        self
    }

    /// Query parameters for the filters that are set
    pub fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        if let Some(year) = self.year {
            params.insert("cve_id_year".to_string(), year.to_string());
        }
        if let Some(state) = self.state.as_deref().filter(|s| !s.is_empty()) {
            params.insert("state".to_string(), state.to_uppercase());
        }
        if let Some(time) = self.reserved_lt {
            params.insert("time_reserved.lt".to_string(), time.to_rfc3339());
        }
        if let Some(time) = self.reserved_gt {
            params.insert("time_reserved.gt".to_string(), time.to_rfc3339());
        }
        params
    }
}
