// SQLite-backed key-value store
// Plays the part of the browser's localStorage for the quote store

pub mod cache;

pub use cache::{CacheError, KvStore};
