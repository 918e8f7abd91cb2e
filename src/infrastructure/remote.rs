//! Remote posts endpoint
//!
//! The remote side is an opaque JSON service: a GET on the endpoint lists
//! posts, a POST with `{title, body}` creates one.

use crate::domain::Quote;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Category given to every quote that came from the remote endpoint
pub const SERVER_CATEGORY: &str = "Server";

/// A post as listed by the remote endpoint; only the title is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePost {
    pub title: String,
}

impl RemotePost {
    pub fn into_quote(self) -> Quote {
        Quote {
            text: self.title,
            category: SERVER_CATEGORY.to_string(),
        }
    }
}

/// Body sent when uploading one quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

impl From<&Quote> for NewPost {
    fn from(quote: &Quote) -> Self {
        NewPost {
            title: quote.text.clone(),
            body: quote.category.clone(),
        }
    }
}

/// Remote service quotes are pulled from and pushed to
pub trait RemoteEndpoint: Send + Sync {
    /// List every post on the remote side
    fn fetch_posts(&self) -> impl Future<Output = Result<Vec<RemotePost>>> + Send;

    /// Create one post and return the server's echo of it
    fn create_post(
        &self,
        post: &NewPost,
    ) -> impl Future<Output = Result<serde_json::Value>> + Send;
}

/// HTTP implementation backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Use a preconfigured client (proxy, timeouts, TLS)
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        HttpEndpoint {
            client,
            url: url.into(),
        }
    }
}

impl RemoteEndpoint for HttpEndpoint {
    async fn fetch_posts(&self) -> Result<Vec<RemotePost>> {
        let posts = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<RemotePost>>()
            .await?;
        Ok(posts)
    }

    async fn create_post(&self, post: &NewPost) -> Result<serde_json::Value> {
        let created = self
            .client
            .post(&self.url)
            .json(post)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;
        Ok(created)
    }
}
