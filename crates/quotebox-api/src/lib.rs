// HTTP client for the remote posts endpoint the quotes sync against
pub mod posts;

pub use posts::{ApiError, PostsClient, RemotePost};
