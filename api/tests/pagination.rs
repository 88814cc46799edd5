//! Pagination engine behaviour against in-memory page sources.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use api::pagination::DEFAULT_PAGE_SIZE;
use api::{
    paginate, ApiError, CancellationToken, ClientError, Page, PageStrategy, PagedRequest,
    PagedResponse,
};
use futures::StreamExt;

#[derive(Debug, Clone, Default)]
struct CursorRequest {
    cursor: Option<String>,
    limit: Option<i64>,
}

impl PagedRequest for CursorRequest {
    const STRATEGY: PageStrategy = PageStrategy::Cursor;

    fn page_size(&self) -> Option<i64> {
        self.limit
    }

    fn set_page_size(&mut self, size: i64) {
        self.limit = Some(size);
    }

    fn set_page_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }
}

#[derive(Debug, Clone, Default)]
struct OffsetRequest {
    offset: Option<i64>,
    size: Option<i64>,
}

impl PagedRequest for OffsetRequest {
    const STRATEGY: PageStrategy = PageStrategy::Offset;

    fn page_size(&self) -> Option<i64> {
        self.size
    }

    fn set_page_size(&mut self, size: i64) {
        self.size = Some(size);
    }

    fn page_offset(&self) -> Option<i64> {
        self.offset
    }

    fn set_page_offset(&mut self, offset: i64) {
        self.offset = Some(offset);
    }
}

struct Listing {
    data: Option<Vec<u64>>,
    after: Option<String>,
}

impl PagedResponse for Listing {
    type Item = u64;

    fn into_page(self) -> Option<Page<u64>> {
        let items = self.data?;
        Some(Page {
            items,
            next_cursor: self.after,
        })
    }
}

/// Serves `total` sequential items, `limit` at a time, naming the next
/// page by the index of its first item.
fn cursor_source(total: u64, req: &CursorRequest) -> Listing {
    let start: u64 = req.cursor.as_deref().map_or(0, |c| c.parse().unwrap());
    let limit = req.limit.unwrap() as u64;
    let end = (start + limit).min(total);
    Listing {
        data: Some((start..end).collect()),
        after: Some(end.to_string()),
    }
}

fn recorder<R: Clone>() -> Arc<Mutex<Vec<R>>> {
    Arc::new(Mutex::new(Vec::new()))
}

async fn drain<T>(stream: api::Paginated<T>) -> Vec<Result<T, ApiError>> {
    stream.collect().await
}

#[tokio::test]
async fn cursor_run_yields_every_item_in_order() {
    let calls = recorder::<CursorRequest>();
    let seen = calls.clone();

    let request = CursorRequest {
        limit: Some(10),
        ..Default::default()
    };
    let stream = paginate(request, CancellationToken::new(), move |req: CursorRequest| {
        let seen = seen.clone();
        async move {
            seen.lock().unwrap().push(req.clone());
            Ok::<_, ApiError>(cursor_source(25, &req))
        }
    });

    let items: Vec<u64> = drain(stream).await.into_iter().map(Result::unwrap).collect();
    assert_eq!(items, (0..25).collect::<Vec<_>>());

    let calls = calls.lock().unwrap();
    let cursors: Vec<_> = calls.iter().map(|r| r.cursor.clone()).collect();
    assert_eq!(
        cursors,
        vec![None, Some("10".to_string()), Some("20".to_string())]
    );
}

#[tokio::test]
async fn cursor_run_exact_multiple_ends_on_empty_page() {
    let calls = recorder::<CursorRequest>();
    let seen = calls.clone();

    let request = CursorRequest {
        limit: Some(5),
        ..Default::default()
    };
    let stream = paginate(request, CancellationToken::new(), move |req: CursorRequest| {
        let seen = seen.clone();
        async move {
            seen.lock().unwrap().push(req.clone());
            Ok::<_, ApiError>(cursor_source(10, &req))
        }
    });

    assert_eq!(drain(stream).await.len(), 10);
    assert_eq!(calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn cursor_run_stops_without_next_cursor() {
    let calls = recorder::<CursorRequest>();
    let seen = calls.clone();

    let stream = paginate(
        CursorRequest::default(),
        CancellationToken::new(),
        move |req: CursorRequest| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push(req);
                Ok::<_, ApiError>(Listing {
                    data: Some((0..10).collect()),
                    after: None,
                })
            }
        },
    );

    assert_eq!(drain(stream).await.len(), 10);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn default_page_size_is_applied() {
    let calls = recorder::<CursorRequest>();
    let seen = calls.clone();

    let stream = paginate(
        CursorRequest::default(),
        CancellationToken::new(),
        move |req: CursorRequest| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push(req.clone());
                Ok::<_, ApiError>(cursor_source(3, &req))
            }
        },
    );

    assert_eq!(drain(stream).await.len(), 3);
    assert_eq!(calls.lock().unwrap()[0].limit, Some(DEFAULT_PAGE_SIZE));
}

#[tokio::test]
async fn missing_result_list_ends_silently() {
    let stream = paginate(
        CursorRequest::default(),
        CancellationToken::new(),
        |_req: CursorRequest| async {
            Ok::<_, ApiError>(Listing {
                data: None,
                after: Some("next".to_string()),
            })
        },
    );

    assert!(drain(stream).await.is_empty());
}

#[tokio::test]
async fn offset_run_advances_by_page_size() {
    let calls = recorder::<OffsetRequest>();
    let seen = calls.clone();

    let request = OffsetRequest {
        offset: None,
        size: Some(4),
    };
    let stream = paginate(request, CancellationToken::new(), move |req: OffsetRequest| {
        let seen = seen.clone();
        async move {
            seen.lock().unwrap().push(req.clone());
            let start = req.offset.unwrap_or(0) as u64;
            let end = (start + 4).min(10);
            Ok::<_, ApiError>(Listing {
                data: Some((start..end).collect()),
                after: None,
            })
        }
    });

    let items: Vec<u64> = drain(stream).await.into_iter().map(Result::unwrap).collect();
    assert_eq!(items, (0..10).collect::<Vec<_>>());

    let offsets: Vec<i64> = calls
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.offset.unwrap_or(0))
        .collect();
    assert_eq!(offsets, vec![0, 4, 8]);
}

#[tokio::test]
async fn fetch_error_is_delivered_once_then_stream_ends() {
    let calls = recorder::<CursorRequest>();
    let seen = calls.clone();

    let request = CursorRequest {
        limit: Some(4),
        ..Default::default()
    };
    let stream = paginate(request, CancellationToken::new(), move |req: CursorRequest| {
        let seen = seen.clone();
        async move {
            let call = {
                let mut seen = seen.lock().unwrap();
                seen.push(req.clone());
                seen.len()
            };
            if call == 2 {
                return Err(ApiError::from(ClientError::http_status(500, "boom")));
            }
            Ok(cursor_source(100, &req))
        }
    });

    let results = drain(stream).await;
    assert_eq!(results.len(), 5);
    assert!(results[..4].iter().all(Result::is_ok));
    assert!(matches!(
        results[4],
        Err(ApiError::Client(ClientError::HttpStatus { status: 500, .. }))
    ));

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn cancel_stops_delivery() {
    let calls = recorder::<CursorRequest>();
    let seen = calls.clone();

    let request = CursorRequest {
        limit: Some(5),
        ..Default::default()
    };
    let mut stream = paginate(request, CancellationToken::new(), move |req: CursorRequest| {
        let seen = seen.clone();
        async move {
            seen.lock().unwrap().push(req.clone());
            Ok::<_, ApiError>(cursor_source(u64::MAX, &req))
        }
    });

    for expected in 0..3 {
        assert_eq!(stream.next().await.unwrap().unwrap(), expected);
    }
    stream.cancel();
    assert!(stream.is_cancelled());
    assert!(stream.next().await.is_none());

    // the producer stops within a bounded number of pages
    tokio::time::sleep(Duration::from_millis(20)).await;
    let fetched = calls.lock().unwrap().len();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(calls.lock().unwrap().len(), fetched);
    assert!(fetched <= 3);
}

#[tokio::test]
async fn parent_token_cancels_run() {
    let parent = CancellationToken::new();
    let mut stream = paginate(
        CursorRequest::default(),
        parent.clone(),
        |req: CursorRequest| async move { Ok::<_, ApiError>(cursor_source(u64::MAX, &req)) },
    );

    assert_eq!(stream.next().await.unwrap().unwrap(), 0);
    parent.cancel();
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn dropping_stream_cancels_only_its_own_token() {
    let parent = CancellationToken::new();
    let stream = paginate(
        CursorRequest::default(),
        parent.clone(),
        |req: CursorRequest| async move { Ok::<_, ApiError>(cursor_source(u64::MAX, &req)) },
    );
    let token = stream.cancellation_token();

    drop(stream);
    assert!(token.is_cancelled());
    assert!(!parent.is_cancelled());
}
