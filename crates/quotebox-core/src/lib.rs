// Core quote logic: the store, its persistence seam, and the remote sync
pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod providers;
pub mod scheduler;
pub mod storage;
pub mod store;
pub mod sync;

pub use app::{Change, QuoteApp, SeedOutcome};
pub use config::Config;
pub use error::Error;
pub use export::{Exporter, DEFAULT_EXPORT_FILE};
pub use models::{CategoryFilter, Quote};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::QuoteStore;
pub use sync::{PushOutcome, RemoteQuotes, SeedSettings, SyncService};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
