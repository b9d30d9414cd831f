//! Background scheduler for the periodic push.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant};
use tracing::{debug, info, warn};

use crate::app::QuoteApp;
use crate::sync::PushOutcome;

/// Shortest period the scheduler will run at; tokio rejects a zero interval
pub const MIN_SYNC_PERIOD: Duration = Duration::from_secs(1);

/// Starts pushing every `period`, first push one full period from now.
///
/// Periods below [`MIN_SYNC_PERIOD`] are raised to it. The task never
/// ends on its own; abort the handle to stop it.
pub fn start_periodic_sync(app: Arc<QuoteApp>, period: Duration) -> JoinHandle<()> {
    let period = period.max(MIN_SYNC_PERIOD);
    tokio::spawn(async move {
        info!("Periodic sync started ({}s interval)", period.as_secs());

        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            run_scheduled_push(&app).await;
        }
    })
}

async fn run_scheduled_push(app: &QuoteApp) {
    match app.sync_now().await {
        Some(PushOutcome::Completed { pushed }) => {
            info!("Scheduled sync pushed {} quotes", pushed);
        }
        Some(PushOutcome::Aborted { pushed, error }) => {
            warn!("Scheduled sync stopped after {} quotes: {}", pushed, error);
        }
        Some(PushOutcome::Skipped) => {
            debug!("Scheduled sync skipped: previous push still running");
        }
        None => debug!("Scheduled sync skipped: sync disabled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quote;
    use crate::storage::MemoryStore;
    use crate::store::QuoteStore;
    use crate::sync::{RemoteQuotes, SyncService};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingRemote {
        pushes: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl RemoteQuotes for CountingRemote {
        async fn fetch_titles(&self) -> crate::Result<Vec<String>> {
            Ok(Vec::new())
        }

        async fn push_quote(&self, _quote: &Quote) -> crate::Result<String> {
            self.pushes.fetch_add(1, Ordering::SeqCst);
            Ok("{}".to_string())
        }
    }

    fn app_with(remote: Arc<CountingRemote>) -> Arc<QuoteApp> {
        let store = QuoteStore::new(
            Box::new(MemoryStore::new()),
            vec![Quote::new("Do or do not.", "Motivation")],
        );
        Arc::new(QuoteApp::new(store, Some(SyncService::new(remote))))
    }

    #[tokio::test(start_paused = true)]
    async fn test_pushes_once_per_period() {
        let remote = Arc::new(CountingRemote::default());
        let app = app_with(remote.clone());

        let handle = start_periodic_sync(app, Duration::from_secs(300));

        tokio::time::sleep(Duration::from_secs(299)).await;
        assert_eq!(remote.pushes.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(remote.pushes.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(remote.pushes.load(Ordering::SeqCst), 2);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_runs_at_minimum() {
        let remote = Arc::new(CountingRemote::default());
        let handle = start_periodic_sync(app_with(remote.clone()), Duration::ZERO);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(remote.pushes.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(remote.pushes.load(Ordering::SeqCst), 1);
        assert!(!handle.is_finished());

        handle.abort();
    }
}
