// Remote implementations for the sync adapter
pub mod posts;

pub use posts::PostsProvider;
