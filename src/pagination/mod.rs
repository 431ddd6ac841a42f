//! Pagination module
//!
//! Follows the IDR `nextPage` cursor across a paged list endpoint.
//!
//! # Overview
//!
//! Each response carries its items in a field named after the resource
//! (for example `cve_ids`) and, while more results exist, a `nextPage`
//! cursor. The cursor is sent back as the `page` query parameter. Small
//! results have no pagination fields at all, which is treated the same as
//! `nextPage: null`.

mod paginator;
mod types;

pub use paginator::{paginate, ItemStream};
pub use types::{Page, PageRequest, NEXT_PAGE_FIELD, PAGE_PARAM};
