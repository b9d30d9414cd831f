// Posts API provider - bridges the HTTP client with the RemoteQuotes trait
use async_trait::async_trait;
use quotebox_api::PostsClient;

use crate::{models::Quote, sync::RemoteQuotes, Result};

/// Wrapper around PostsClient that implements RemoteQuotes
pub struct PostsProvider {
    client: PostsClient,
}

impl PostsProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: PostsClient::with_base_url(base_url.to_string())?,
        })
    }

    pub fn endpoint(&self) -> String {
        self.client.posts_url()
    }
}

#[async_trait]
impl RemoteQuotes for PostsProvider {
    async fn fetch_titles(&self) -> Result<Vec<String>> {
        let posts = self.client.list_posts().await?;
        Ok(posts.into_iter().map(|post| post.title).collect())
    }

    async fn push_quote(&self, quote: &Quote) -> Result<String> {
        // Body is exactly {text, category}, the Quote serialization
        let echoed = self.client.create_post(quote).await?;
        Ok(echoed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let provider = PostsProvider::new("https://jsonplaceholder.typicode.com").unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://jsonplaceholder.typicode.com/posts"
        );
    }

    #[tokio::test]
    async fn test_unreachable_remote_maps_to_remote_error() {
        let provider = PostsProvider::new("http://127.0.0.1:9").unwrap();
        let result = provider
            .push_quote(&Quote::new("Stay hungry.", "Motivation"))
            .await;
        assert!(matches!(result, Err(crate::Error::Remote(_))));
    }
}
