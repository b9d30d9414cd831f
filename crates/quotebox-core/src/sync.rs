// Remote sync: one-shot seed pull plus push-everything
use crate::{models::Quote, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Remote side of the sync, kept behind a trait so tests don't need a network
///
/// Each platform client gets a thin provider implementing this.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RemoteQuotes: Send + Sync {
    /// Titles of every item the remote currently lists, in remote order
    async fn fetch_titles(&self) -> Result<Vec<String>>;

    /// Send one quote; returns the remote's echo for logging
    async fn push_quote(&self, quote: &Quote) -> Result<String>;
}

/// How remote items are turned into local quotes
#[derive(Debug, Clone)]
pub struct SeedSettings {
    pub limit: usize,
    pub category: String,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            limit: 10,
            category: "server".to_string(),
        }
    }
}

/// Result of one `push_all` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Every quote was sent
    Completed { pushed: usize },
    /// A POST failed; quotes after it were not attempted
    Aborted { pushed: usize, error: String },
    /// Another push was already running, this trigger was dropped
    Skipped,
}

/// Pulls the seed batch and pushes local quotes, one push at a time
pub struct SyncService {
    remote: Arc<dyn RemoteQuotes>,
    seed: SeedSettings,
    pushing: AtomicBool,
}

impl SyncService {
    pub fn new(remote: Arc<dyn RemoteQuotes>) -> Self {
        Self::with_seed_settings(remote, SeedSettings::default())
    }

    pub fn with_seed_settings(remote: Arc<dyn RemoteQuotes>, seed: SeedSettings) -> Self {
        Self {
            remote,
            seed,
            pushing: AtomicBool::new(false),
        }
    }

    pub fn is_pushing(&self) -> bool {
        self.pushing.load(Ordering::SeqCst)
    }

    /// Fetch the remote list and map the first `limit` titles to quotes
    ///
    /// No retry. The caller decides where the quotes go.
    pub async fn fetch_seed(&self) -> Result<Vec<Quote>> {
        let titles = self.remote.fetch_titles().await.map_err(|e| {
            error!("Error fetching quotes from server: {}", e);
            e
        })?;

        let quotes: Vec<Quote> = titles
            .into_iter()
            .take(self.seed.limit)
            .map(|title| Quote::new(title, self.seed.category.clone()))
            .collect();

        info!("Fetched {} quotes from server", quotes.len());
        Ok(quotes)
    }

    /// POST every quote in order, stopping at the first failure
    ///
    /// Only one push runs at a time; an overlapping call returns
    /// `PushOutcome::Skipped` without touching the network.
    pub async fn push_all(&self, quotes: &[Quote]) -> PushOutcome {
        let Some(_guard) = PushGuard::acquire(&self.pushing) else {
            debug!("Push already in progress, dropping trigger");
            return PushOutcome::Skipped;
        };

        let mut pushed = 0;
        for quote in quotes {
            match self.remote.push_quote(quote).await {
                Ok(echo) => {
                    debug!("Quote posted to server: {}", echo);
                    pushed += 1;
                }
                Err(e) => {
                    // Failed quotes are dropped, not requeued
                    error!("Error syncing quotes with server: {}", e);
                    return PushOutcome::Aborted {
                        pushed,
                        error: e.to_string(),
                    };
                }
            }
        }

        info!("Quotes synced with server ({} pushed)", pushed);
        PushOutcome::Completed { pushed }
    }
}

/// Holds the in-flight flag; clears it on drop so a cancelled push doesn't wedge
struct PushGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PushGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for PushGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
