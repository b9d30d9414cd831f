//! Ties the quote store to the sync adapter.
//!
//! Front ends call into [`QuoteApp`] rather than the store directly so that
//! persistence and the follow-up push happen in one place.

use crate::{
    export::Exporter,
    models::{CategoryFilter, Quote},
    store::QuoteStore,
    sync::{PushOutcome, SyncService},
    Result,
};
use std::path::Path;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

/// What happened to the one-shot seed pull
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Merged { added: usize },
    Failed { error: String },
    /// No remote configured
    Disabled,
}

/// Result of a local mutation plus the push it triggered, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change<T> {
    pub value: T,
    pub push: Option<PushOutcome>,
}

pub struct QuoteApp {
    store: Mutex<QuoteStore>,
    sync: Option<SyncService>,
    push_on_change: bool,
}

impl QuoteApp {
    /// `sync: None` runs fully offline
    pub fn new(store: QuoteStore, sync: Option<SyncService>) -> Self {
        Self {
            store: Mutex::new(store),
            sync,
            push_on_change: true,
        }
    }

    pub fn with_push_on_change(mut self, enabled: bool) -> Self {
        self.push_on_change = enabled;
        self
    }

    pub fn sync_enabled(&self) -> bool {
        self.sync.is_some()
    }

    /// Direct access for queries; don't hold it across a push
    pub async fn store(&self) -> MutexGuard<'_, QuoteStore> {
        self.store.lock().await
    }

    pub async fn add_quote(&self, text: &str, category: &str) -> Result<Change<Quote>> {
        let quote = self.store.lock().await.add(text, category)?;
        let push = self.push_after_change().await;
        Ok(Change { value: quote, push })
    }

    /// Append an already-parsed batch and push
    pub async fn import_quotes(&self, batch: Vec<Quote>) -> Result<Change<usize>> {
        let count = self.store.lock().await.import_batch(batch)?;
        let push = self.push_after_change().await;
        Ok(Change { value: count, push })
    }

    /// Parse `path` then import it; a malformed file leaves the store untouched
    pub async fn import_file(&self, path: &Path) -> Result<Change<usize>> {
        let batch = Exporter::import_from_file(path)?;
        self.import_quotes(batch).await
    }

    pub async fn export_file(&self, path: &Path) -> Result<usize> {
        let store = self.store.lock().await;
        Exporter::export_to_file(store.quotes(), path)?;
        info!("Exported {} quotes to {}", store.len(), path.display());
        Ok(store.len())
    }

    pub async fn random_quote(&self) -> Option<Quote> {
        self.store.lock().await.random_quote().cloned()
    }

    /// Persist the filter and draw a quote under it
    pub async fn filter_and_pick(&self, filter: CategoryFilter) -> Result<Option<Quote>> {
        let mut store = self.store.lock().await;
        store.select_category(filter)?;
        Ok(store.random_quote().cloned())
    }

    /// Pull the seed batch and merge it into the store
    ///
    /// Remote failures are logged and reported, never returned as `Err`.
    /// A failure to persist the merged quotes is.
    pub async fn load_seed(&self) -> Result<SeedOutcome> {
        let Some(sync) = &self.sync else {
            return Ok(SeedOutcome::Disabled);
        };

        match sync.fetch_seed().await {
            Ok(seed) => {
                let added = self.store.lock().await.import_batch(seed)?;
                Ok(SeedOutcome::Merged { added })
            }
            Err(e) => Ok(SeedOutcome::Failed {
                error: e.to_string(),
            }),
        }
    }

    /// Push every quote now, regardless of `push_on_change`
    pub async fn sync_now(&self) -> Option<PushOutcome> {
        let sync = self.sync.as_ref()?;
        // Snapshot so the lock isn't held across network I/O
        let snapshot = self.store.lock().await.quotes().to_vec();
        Some(sync.push_all(&snapshot).await)
    }

    async fn push_after_change(&self) -> Option<PushOutcome> {
        if !self.push_on_change {
            return None;
        }

        let outcome = self.sync_now().await;
        if let Some(PushOutcome::Aborted { error, .. }) = &outcome {
            warn!("Change saved locally but push failed: {}", error);
        }
        outcome
    }
}
