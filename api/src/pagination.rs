//! Lazy, cancellable iteration over paged list operations.
//!
//! [`paginate`] turns a single-page fetch function into a [`Paginated`]
//! stream of items. A background task fetches one page at a time, pushes
//! its items through a bounded channel (capacity = page size), then advances
//! the request's cursor or offset and fetches again.
//!
//! The run ends when:
//! - a page holds fewer items than the page size (or none at all);
//! - cursor style: the response carries no next cursor;
//! - the response has no result list, or decoded as raw JSON;
//! - a fetch fails: the error is delivered as the final item;
//! - the cancellation token fires, or the [`Paginated`] handle is dropped.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use futures::StreamExt;
//!
//! let mut events = events_api.list_events_with_pagination(params);
//! while let Some(event) = events.next().await {
//!     let event = event?;
//!     println!("{:?}", event);
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, Instrument};

use crate::error::ApiError;
use crate::model::Decoded;

/// Page size used when the request does not set one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// How a request moves from one page to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStrategy {
    /// The response names the next page with an opaque cursor.
    Cursor,
    /// The request skips `offset` items; it grows by the page size.
    Offset,
}

/// A list request that can be re-issued for successive pages.
pub trait PagedRequest: Clone + Send + 'static {
    /// How this request advances.
    const STRATEGY: PageStrategy;

    /// The page size the caller asked for, if any.
    fn page_size(&self) -> Option<i64>;

    /// Fixes the page size for the run.
    fn set_page_size(&mut self, size: i64);

    /// Points the request at the page after `cursor`. Cursor style only.
    fn set_page_cursor(&mut self, _cursor: String) {}

    /// The current offset. Offset style only.
    fn page_offset(&self) -> Option<i64> {
        None
    }

    /// Sets the offset of the next page. Offset style only.
    fn set_page_offset(&mut self, _offset: i64) {}
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor of the following page, when the response carries one.
    pub next_cursor: Option<String>,
}

/// A decoded list response.
pub trait PagedResponse: Send + 'static {
    type Item: Send + 'static;

    /// Splits the response into its items and next cursor.
    ///
    /// Returns `None` when the response carries no result list.
    fn into_page(self) -> Option<Page<Self::Item>>;
}

impl<R: PagedResponse> PagedResponse for Decoded<R> {
    type Item = R::Item;

    fn into_page(self) -> Option<Page<Self::Item>> {
        self.into_typed().and_then(PagedResponse::into_page)
    }
}

/// A stream of items produced by a background pagination task.
///
/// Dropping the stream cancels the task.
#[derive(Debug)]
pub struct Paginated<T> {
    items: ReceiverStream<Result<T, ApiError>>,
    cancel: CancellationToken,
}

impl<T> Paginated<T> {
    /// Stops the run. No further items are yielded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once the run has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A token that cancels this run when fired.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl<T> Stream for Paginated<T> {
    type Item = Result<T, ApiError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.cancel.is_cancelled() {
            return Poll::Ready(None);
        }
        Pin::new(&mut self.items).poll_next(cx)
    }
}

impl<T> Drop for Paginated<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Starts a pagination run.
///
/// `fetch` is called with the request for each page, one call at a time. The
/// request's page size defaults to [`DEFAULT_PAGE_SIZE`] and stays fixed for
/// the run. Cancelling `cancel` (or any parent of it) stops the run; the
/// returned stream owns a child token, so dropping it does not cancel
/// `cancel` itself.
///
/// Must be called from within a tokio runtime.
pub fn paginate<Req, Resp, F, Fut>(
    mut request: Req,
    cancel: CancellationToken,
    fetch: F,
) -> Paginated<Resp::Item>
where
    Req: PagedRequest,
    Resp: PagedResponse,
    F: FnMut(Req) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Resp, ApiError>> + Send + 'static,
{
    let page_size = match request.page_size() {
        Some(size) => size,
        None => {
            request.set_page_size(DEFAULT_PAGE_SIZE);
            DEFAULT_PAGE_SIZE
        }
    };

    let capacity = usize::try_from(page_size).unwrap_or(1).max(1);
    let (tx, rx) = mpsc::channel(capacity);
    let cancel = cancel.child_token();

    let span = info_span!("paginate", strategy = ?Req::STRATEGY, page_size);
    tokio::spawn(run(request, page_size, fetch, tx, cancel.clone()).instrument(span));

    Paginated {
        items: ReceiverStream::new(rx),
        cancel,
    }
}

async fn run<Req, Resp, F, Fut>(
    mut request: Req,
    page_size: i64,
    mut fetch: F,
    tx: mpsc::Sender<Result<Resp::Item, ApiError>>,
    cancel: CancellationToken,
) where
    Req: PagedRequest,
    Resp: PagedResponse,
    F: FnMut(Req) -> Fut,
    Fut: Future<Output = Result<Resp, ApiError>>,
{
    let mut pages = 0_u64;

    loop {
        if cancel.is_cancelled() {
            debug!(pages, "cancelled");
            return;
        }

        let response = match fetch(request.clone()).await {
            Ok(response) => response,
            Err(error) => {
                debug!(pages, %error, "page fetch failed");
                emit(&tx, &cancel, Err(error)).await;
                return;
            }
        };
        pages += 1;

        let Some(page) = response.into_page() else {
            debug!(pages, "response has no result list; stopping");
            return;
        };

        let count = page.items.len();
        debug!(page = pages, items = count, "fetched page");

        for item in page.items {
            if !emit(&tx, &cancel, Ok(item)).await {
                debug!(pages, "consumer gone or cancelled");
                return;
            }
        }

        if count == 0 || i64::try_from(count).is_ok_and(|n| n < page_size) {
            debug!(pages, "short page; stopping");
            return;
        }

        match Req::STRATEGY {
            PageStrategy::Cursor => match page.next_cursor {
                Some(cursor) => request.set_page_cursor(cursor),
                None => {
                    debug!(pages, "no next cursor; stopping");
                    return;
                }
            },
            PageStrategy::Offset => {
                let next = request.page_offset().unwrap_or(0) + page_size;
                request.set_page_offset(next);
            }
        }
    }
}

/// Sends one item unless the run is cancelled first.
///
/// Returns `false` if the item was not delivered.
async fn emit<T>(tx: &mpsc::Sender<T>, cancel: &CancellationToken, item: T) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        sent = tx.send(item) => sent.is_ok(),
    }
}
