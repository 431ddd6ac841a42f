//! Lazy traversal of a paged endpoint

use super::types::{Page, PageRequest};
use crate::error::{Error, Result};
use crate::http::{read_json, HttpClient, RequestConfig};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::Value;
use tracing::debug;

/// Stream of items produced by a pagination run
pub type ItemStream<'a> = BoxStream<'a, Result<Value>>;

/// Fetch every page of `request`, yielding items as each page arrives.
///
/// A page is only requested once the items of the previous page have been
/// consumed, so dropping the stream early stops further requests. An error
/// ends the stream; items already yielded are not affected.
pub fn paginate(client: &HttpClient, request: PageRequest) -> ItemStream<'_> {
    let pages = stream::try_unfold(Some(request), move |state| async move {
        let Some(mut request) = state else {
            return Ok::<_, Error>(None);
        };

        let page = fetch_page(client, &request).await?;
        debug!(
            "Fetched {} {} items (page {}), next page: {:?}",
            page.items.len(),
            request.data_field,
            request.page().unwrap_or("1"),
            page.next_page
        );

        let next = match page.next_page {
            Some(cursor) => {
                request.advance(cursor);
                Some(request)
            }
            None => None,
        };

        Ok(Some((page.items, next)))
    });

    pages
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<Value, Error>)))
        .try_flatten()
        .boxed()
}

async fn fetch_page(client: &HttpClient, request: &PageRequest) -> Result<Page> {
    let response = client
        .get(&request.path, RequestConfig::with_query(request.params.clone()))
        .await?;
    let body = read_json(response).await?;
    Page::from_body(body, &request.data_field)
}
