//! Pagination types
//!
//! A [`Page`] is one decoded response; a [`PageRequest`] is the request
//! context owned by a single pagination run.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Response field holding the cursor of the next page
pub const NEXT_PAGE_FIELD: &str = "nextPage";

/// Query parameter the cursor is sent back in
pub const PAGE_PARAM: &str = "page";

/// One decoded page of a paged endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Items of this page, in server order
    pub items: Vec<Value>,
    /// Cursor of the next page, `None` on the last page
    pub next_page: Option<String>,
}

impl Page {
    /// Split a response body into its items and next-page cursor
    pub fn from_body(body: Value, data_field: &str) -> Result<Self> {
        let Value::Object(mut body) = body else {
            return Err(Error::decode("page body is not a JSON object"));
        };

        let items = match body.remove(data_field) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(Error::decode(format!(
                    "field '{data_field}' is not an array: {other}"
                )))
            }
            None => return Err(Error::missing_field(data_field)),
        };

        let next_page = match body.remove(NEXT_PAGE_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::String(cursor)) => Some(cursor),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self { items, next_page })
    }

    /// Whether this is the final page
    pub fn is_last(&self) -> bool {
        self.next_page.is_none()
    }
}

/// Request context of one pagination run
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Resource path relative to the base URL
    pub path: String,
    /// Name of the array field holding items
    pub data_field: String,
    /// Query parameters, including the current page cursor
    pub params: HashMap<String, String>,
}

impl PageRequest {
    /// Create a request for the first page
    pub fn new(
        path: impl Into<String>,
        data_field: impl Into<String>,
        params: HashMap<String, String>,
    ) -> Self {
        Self {
            path: path.into(),
            data_field: data_field.into(),
            params,
        }
    }

    /// Point the request at the given page cursor
    pub fn advance(&mut self, cursor: String) {
        self.params.insert(PAGE_PARAM.to_string(), cursor);
    }

    /// Current page cursor, if any page past the first was requested
    pub fn page(&self) -> Option<&str> {
        self.params.get(PAGE_PARAM).map(String::as_str)
    }
}
