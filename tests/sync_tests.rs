//! Remote sync against in-process endpoints

use quotebook::application::{init, open_book, QuoteBook, RemoteSync, SharedBook, SyncScheduler};
use quotebook::domain::{codec, Quote, QuoteCollection};
use quotebook::error::{QuoteError, Result};
use quotebook::infrastructure::{
    MemoryStore, NewPost, PersistentStore, RemoteEndpoint, RemotePost, QUOTES_KEY,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Mutex;

#[derive(Default)]
struct MockEndpoint {
    posts: Vec<RemotePost>,
    fail_fetch: bool,
    fail_titles: HashSet<String>,
    fetches: AtomicUsize,
    created: StdMutex<Vec<NewPost>>,
}

impl MockEndpoint {
    fn with_titles(titles: &[&str]) -> Self {
        MockEndpoint {
            posts: titles
                .iter()
                .map(|t| RemotePost {
                    title: t.to_string(),
                })
                .collect(),
            ..MockEndpoint::default()
        }
    }

    fn created(&self) -> Vec<NewPost> {
        self.created.lock().unwrap().clone()
    }
}

impl RemoteEndpoint for MockEndpoint {
    async fn fetch_posts(&self) -> Result<Vec<RemotePost>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(QuoteError::Transport("connection refused".to_string()));
        }
        Ok(self.posts.clone())
    }

    async fn create_post(&self, post: &NewPost) -> Result<serde_json::Value> {
        if self.fail_titles.contains(&post.title) {
            return Err(QuoteError::Transport("503 Service Unavailable".to_string()));
        }
        self.created.lock().unwrap().push(post.clone());
        Ok(serde_json::json!({"id": 101, "title": post.title, "body": post.body}))
    }
}

/// Endpoint whose fetch takes longer than the sync period
#[derive(Default)]
struct SlowEndpoint {
    fetches: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RemoteEndpoint for SlowEndpoint {
    async fn fetch_posts(&self) -> Result<Vec<RemotePost>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(150)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn create_post(&self, _post: &NewPost) -> Result<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }
}

fn quote(text: &str, category: &str) -> Quote {
    Quote::new(text, category).unwrap()
}

fn shared_book(quotes: Vec<Quote>) -> SharedBook<MemoryStore> {
    Arc::new(Mutex::new(QuoteBook::with_collection(
        MemoryStore::new(),
        QuoteCollection::from_quotes(quotes),
    )))
}

#[tokio::test]
async fn test_pull_appends_server_quotes() {
    let endpoint = Arc::new(MockEndpoint::with_titles(&["first", "second"]));
    let book = shared_book(vec![quote("mine", "Local"), quote("mine", "Local")]);
    let sync = RemoteSync::new(endpoint, book.clone());

    let pulled = sync.pull().await.unwrap();

    assert_eq!(pulled, 2);
    let book = book.lock().await;
    assert_eq!(
        book.snapshot(),
        &[
            quote("mine", "Local"),
            quote("mine", "Local"),
            quote("first", "Server"),
            quote("second", "Server"),
        ]
    );
    assert_eq!(book.categories(), vec!["Local", "Server"]);
}

#[tokio::test]
async fn test_pull_persists_mirror() {
    let endpoint = Arc::new(MockEndpoint::with_titles(&["a"]));
    let book = shared_book(Vec::new());
    let sync = RemoteSync::new(endpoint, book.clone());

    sync.pull().await.unwrap();

    let book = book.lock().await;
    let mirror = book.store().get(QUOTES_KEY).unwrap().unwrap();
    assert_eq!(mirror, codec::serialize_to_string(book.snapshot()).unwrap());
}

#[tokio::test]
async fn test_pull_twice_does_not_deduplicate() {
    let endpoint = Arc::new(MockEndpoint::with_titles(&["same"]));
    let book = shared_book(Vec::new());
    let sync = RemoteSync::new(endpoint, book.clone());

    sync.pull().await.unwrap();
    sync.pull().await.unwrap();

    assert_eq!(book.lock().await.snapshot().len(), 2);
}

#[tokio::test]
async fn test_pull_failure_leaves_book_untouched() {
    let endpoint = Arc::new(MockEndpoint {
        fail_fetch: true,
        ..MockEndpoint::with_titles(&["never"])
    });
    let book = shared_book(vec![quote("mine", "Local")]);
    let sync = RemoteSync::new(endpoint, book.clone());

    assert!(matches!(sync.pull().await, Err(QuoteError::Transport(_))));
    assert_eq!(book.lock().await.snapshot(), &[quote("mine", "Local")]);
}

#[tokio::test]
async fn test_push_posts_each_quote_in_order() {
    let endpoint = Arc::new(MockEndpoint::default());
    let book = shared_book(vec![quote("one", "A"), quote("two", "B")]);
    let sync = RemoteSync::new(endpoint.clone(), book);

    let report = sync.push().await;

    assert_eq!(report.posted, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(
        endpoint.created(),
        vec![
            NewPost {
                title: "one".to_string(),
                body: "A".to_string()
            },
            NewPost {
                title: "two".to_string(),
                body: "B".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_push_continues_after_failure() {
    let endpoint = Arc::new(MockEndpoint {
        fail_titles: HashSet::from(["two".to_string()]),
        ..MockEndpoint::default()
    });
    let book = shared_book(vec![quote("one", "A"), quote("two", "B"), quote("three", "C")]);
    let sync = RemoteSync::new(endpoint.clone(), book);

    let report = sync.push().await;

    assert_eq!(report.posted, 2);
    assert_eq!(report.failed, 1);
    let titles: Vec<String> = endpoint.created().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["one", "three"]);
}

#[tokio::test]
async fn test_cycle_pushes_just_pulled_quotes() {
    let endpoint = Arc::new(MockEndpoint::with_titles(&["remote"]));
    let book = shared_book(vec![quote("local", "Mine")]);
    let sync = RemoteSync::new(endpoint.clone(), book);

    let report = sync.sync_cycle().await;

    assert_eq!(report.pulled, Some(1));
    assert_eq!(report.posted, 2);
    let created = endpoint.created();
    assert_eq!(
        created.last().unwrap(),
        &NewPost {
            title: "remote".to_string(),
            body: "Server".to_string()
        }
    );
}

#[tokio::test]
async fn test_cycle_still_pushes_when_pull_fails() {
    let endpoint = Arc::new(MockEndpoint {
        fail_fetch: true,
        ..MockEndpoint::default()
    });
    let book = shared_book(vec![quote("local", "Mine")]);
    let sync = RemoteSync::new(endpoint.clone(), book);

    let report = sync.sync_cycle().await;

    assert_eq!(report.pulled, None);
    assert_eq!(report.posted, 1);
}

#[tokio::test]
async fn test_cycle_keeps_quotes_added_by_another_process() {
    let temp = TempDir::new().unwrap();
    let repo = init(temp.path()).unwrap();

    // Long-running sync holds its own copy of the book
    let watched = Arc::new(Mutex::new(open_book(repo.clone()).unwrap()));
    let endpoint = Arc::new(MockEndpoint::with_titles(&["remote"]));
    let sync = RemoteSync::new(endpoint.clone(), watched);

    // A separate command adds a quote meanwhile
    let mut foreground = open_book(repo.clone()).unwrap();
    foreground.add("Carpe diem", "Latin").unwrap();

    let report = sync.sync_cycle().await;

    let reopened = open_book(repo).unwrap();
    let texts: Vec<&str> = reopened.snapshot().iter().map(|q| q.text.as_str()).collect();
    assert_eq!(texts.len(), 5);
    assert_eq!(texts[3..], ["Carpe diem", "remote"]);
    assert_eq!(report.posted, 5);
    assert!(endpoint
        .created()
        .iter()
        .any(|post| post.title == "Carpe diem" && post.body == "Latin"));
}

#[tokio::test]
async fn test_push_uploads_quotes_saved_since_last_cycle() {
    let temp = TempDir::new().unwrap();
    let repo = init(temp.path()).unwrap();

    let watched = Arc::new(Mutex::new(open_book(repo.clone()).unwrap()));
    let endpoint = Arc::new(MockEndpoint::default());
    let sync = RemoteSync::new(endpoint.clone(), watched);

    open_book(repo).unwrap().add("late", "Night").unwrap();

    let report = sync.push().await;

    assert_eq!(report.posted, 4);
    assert_eq!(endpoint.created().last().unwrap().title, "late");
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_runs_at_startup_and_every_period() {
    let endpoint = Arc::new(MockEndpoint::with_titles(&["tick"]));
    let book = shared_book(Vec::new());
    let sync = Arc::new(RemoteSync::new(endpoint.clone(), book.clone()));

    let handle = SyncScheduler::start(sync, Duration::from_secs(60));
    assert!(handle.is_running());

    // Cycles at t=0, 60 and 120
    tokio::time::sleep(Duration::from_secs(130)).await;
    assert_eq!(endpoint.fetches.load(Ordering::SeqCst), 3);

    handle.stop().await;
    tokio::time::sleep(Duration::from_secs(600)).await;

    assert_eq!(endpoint.fetches.load(Ordering::SeqCst), 3);
    assert_eq!(book.lock().await.snapshot().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_never_overlaps_slow_cycles() {
    let endpoint = Arc::new(SlowEndpoint::default());
    let book = shared_book(Vec::new());
    let sync = Arc::new(RemoteSync::new(endpoint.clone(), book));

    let handle = SyncScheduler::start(sync, Duration::from_secs(60));
    tokio::time::sleep(Duration::from_secs(400)).await;
    handle.stop().await;

    let fetches = endpoint.fetches.load(Ordering::SeqCst);
    assert!((2..=3).contains(&fetches), "unexpected fetch count {}", fetches);
    assert_eq!(endpoint.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_scheduler() {
    let endpoint = Arc::new(MockEndpoint::default());
    let sync = Arc::new(RemoteSync::new(endpoint.clone(), shared_book(Vec::new())));

    let handle = SyncScheduler::start(sync, Duration::from_secs(60));
    tokio::time::sleep(Duration::from_secs(1)).await;
    drop(handle);
    tokio::time::sleep(Duration::from_secs(600)).await;

    assert_eq!(endpoint.fetches.load(Ordering::SeqCst), 1);
}
