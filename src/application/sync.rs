//! Remote synchronization
//!
//! A sync cycle pulls every remote post into the book (as `Server` quotes),
//! then uploads every local quote one request at a time. Failures are logged
//! and never abort the process; the next cycle simply tries again.

use crate::application::QuoteBook;
use crate::error::Result;
use crate::infrastructure::{NewPost, PersistentStore, RemoteEndpoint, RemotePost};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Book shared between the scheduler task and foreground commands
pub type SharedBook<S> = Arc<Mutex<QuoteBook<S>>>;

/// Outcome of one push pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushReport {
    pub posted: usize,
    pub failed: usize,
}

/// Outcome of one pull-then-push cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Quotes appended by the pull, `None` if the pull was abandoned
    pub pulled: Option<usize>,
    pub posted: usize,
    pub failed: usize,
    pub finished_at: DateTime<Utc>,
}

/// Pulls from and pushes to one remote endpoint
pub struct RemoteSync<E, S> {
    endpoint: Arc<E>,
    book: SharedBook<S>,
}

impl<E, S> RemoteSync<E, S>
where
    E: RemoteEndpoint,
    S: PersistentStore + Send,
{
    pub fn new(endpoint: Arc<E>, book: SharedBook<S>) -> Self {
        RemoteSync { endpoint, book }
    }

    /// Fetch remote posts and append them as `Server` quotes.
    ///
    /// The book lock is only taken after the response is decoded, so a slow
    /// endpoint never blocks foreground commands.
    pub async fn pull(&self) -> Result<usize> {
        let posts = self.endpoint.fetch_posts().await?;
        let records = posts.into_iter().map(RemotePost::into_quote).collect();

        let mut book = self.book.lock().await;
        book.bulk_append(records)
    }

    /// Upload every local quote sequentially, one request per quote.
    ///
    /// The list is reloaded from the store first, so quotes saved by other
    /// processes since the last cycle are uploaded too.
    pub async fn push(&self) -> PushReport {
        let posts: Vec<NewPost> = {
            let mut book = self.book.lock().await;
            if let Err(e) = book.reload() {
                warn!("Could not reload quotes before push: {}", e);
            }
            book.snapshot().iter().map(NewPost::from).collect()
        };

        let mut report = PushReport::default();
        for (index, post) in posts.iter().enumerate() {
            match self.endpoint.create_post(post).await {
                Ok(created) => {
                    report.posted += 1;
                    debug!("Quote posted to server: {}", created);
                }
                Err(e) => {
                    report.failed += 1;
                    error!("Error posting quote #{} to server: {}", index, e);
                }
            }
        }
        report
    }

    /// Run `pull` to completion, then `push` to completion
    pub async fn sync_cycle(&self) -> SyncReport {
        let pulled = match self.pull().await {
            Ok(count) => {
                info!("Pulled {} quotes from server", count);
                Some(count)
            }
            Err(e) => {
                error!("Error fetching quotes from server: {}", e);
                None
            }
        };

        let pushed = self.push().await;
        if pushed.failed > 0 {
            warn!(
                "{} of {} quotes failed to post",
                pushed.failed,
                pushed.posted + pushed.failed
            );
        }
        info!(
            "Sync cycle finished: {} posted, {} failed",
            pushed.posted, pushed.failed
        );

        SyncReport {
            pulled,
            posted: pushed.posted,
            failed: pushed.failed,
            finished_at: Utc::now(),
        }
    }
}

/// Runs sync cycles on a fixed period
pub struct SyncScheduler;

impl SyncScheduler {
    /// Spawn the periodic sync task.
    ///
    /// The first cycle runs immediately. Cycles run inline on the task, so a
    /// cycle that outlasts the period delays the next one instead of
    /// overlapping it; ticks missed meanwhile are skipped.
    pub fn start<E, S>(sync: Arc<RemoteSync<E, S>>, period: Duration) -> SyncHandle
    where
        E: RemoteEndpoint + 'static,
        S: PersistentStore + Send + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tokio::select! {
                            _ = sync.sync_cycle() => {}
                            _ = shutdown_rx.changed() => break,
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
            debug!("Sync scheduler stopped");
        });

        info!("Sync scheduler started, period {:?}", period);
        SyncHandle {
            shutdown,
            task: Some(task),
        }
    }
}

/// Owned handle to a running scheduler. Dropping it aborts the task.
pub struct SyncHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SyncHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the scheduler and wait for its task to exit.
    ///
    /// A cycle in progress is interrupted at its next network await; quotes
    /// already appended by it stay persisted.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    error!("Sync scheduler task failed: {}", e);
                }
            }
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
