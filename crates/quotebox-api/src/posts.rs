use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const POSTS_API_BASE: &str = "https://jsonplaceholder.typicode.com";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Endpoint not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Client for a JSONPlaceholder-style `/posts` resource
///
/// The mock API accepts anything we POST and hands back a fake id,
/// which is all the "server sync" needs.
pub struct PostsClient {
    client: reqwest::Client,
    base_url: String,
}

impl PostsClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(POSTS_API_BASE.to_string())
    }

    /// Point the client at another instance (local mock, staging, ...)
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("quotebox/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    /// List every post the endpoint returns
    pub async fn list_posts(&self) -> Result<Vec<RemotePost>> {
        let url = self.posts_url();
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response, &url).await?;

        // Read as text first so a bad body surfaces as a ParseError, not a network one
        let body = response.text().await?;
        let posts: Vec<RemotePost> = serde_json::from_str(&body)?;
        Ok(posts)
    }

    /// Create a post from any serializable body and return whatever the server echoed
    pub async fn create_post<T: Serialize + ?Sized>(&self, body: &T) -> Result<serde_json::Value> {
        let url = self.posts_url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;
        let response = check_status(response, &url).await?;

        let text = response.text().await?;
        let echoed = serde_json::from_str(&text)?;
        Ok(echoed)
    }
}

async fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response> {
    let status = response.status();

    if status == 404 {
        return Err(ApiError::NotFound(url.to_string()));
    }

    if status == 429 {
        return Err(ApiError::RateLimitExceeded);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::RequestFailed(format!("Status {}: {}", status, body)));
    }

    Ok(response)
}

/// A post as returned by the remote. Only `title` is required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_url_strips_trailing_slash() {
        let client = PostsClient::with_base_url("http://localhost:3000/".to_string()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.posts_url(), "http://localhost:3000/posts");
    }

    #[test]
    fn test_default_base_url() {
        let client = PostsClient::new().unwrap();
        assert_eq!(client.posts_url(), "https://jsonplaceholder.typicode.com/posts");
    }

    #[test]
    fn test_remote_post_parsing() {
        let json = r#"[
            {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit"},
            {"title": "only a title"}
        ]"#;

        let posts: Vec<RemotePost> = serde_json::from_str(json).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].user_id, Some(1));
        assert_eq!(posts[0].title, "sunt aut facere");
        assert_eq!(posts[1].id, None);
        assert_eq!(posts[1].title, "only a title");
    }

    #[test]
    fn test_remote_post_requires_title() {
        let json = r#"[{"userId": 1, "id": 1, "body": "no title here"}]"#;
        let result: std::result::Result<Vec<RemotePost>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Nothing listens on the discard port locally
        let client = PostsClient::with_base_url("http://127.0.0.1:9".to_string()).unwrap();
        let result = client.list_posts().await;
        assert!(matches!(result, Err(ApiError::NetworkError(_))));
    }
}
