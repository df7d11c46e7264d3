//! Remote comments service contract and its HTTP implementation.
//!
//! The service owns storage and id assignment. This module only knows the four
//! JSON-over-HTTP calls the client depends on:
//!
//! | Call                     | Body               | Response          |
//! |--------------------------|--------------------|-------------------|
//! | `GET /comments[/order]`  | —                  | `[Comment]`       |
//! | `POST /comments`         | `{"text": "..."}`  | created `Comment` |
//! | `PUT /comments/{id}`     | `{"text": "..."}`  | updated `Comment` |
//! | `DELETE /comments/{id}`  | —                  | ignored           |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::types::{Comment, CommentId, CommentText, SortOrder};

/// A failed call to the comments service.
///
/// Variants exist for diagnostics only. Callers treat every variant the same
/// way: log it and leave local state as it was.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("decode: {0}")]
    Decode(String),

    #[error("invalid server url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// The four calls the client makes against the comments service.
///
/// Implemented over HTTP by [`HttpCommentService`]; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait CommentService: Send + Sync + 'static {
    async fn list(&self, order: SortOrder) -> Result<Vec<Comment>, ServiceError>;
    async fn create(&self, text: &str) -> Result<Comment, ServiceError>;
    async fn update(&self, id: &CommentId, text: &str) -> Result<Comment, ServiceError>;
    async fn delete(&self, id: &CommentId) -> Result<(), ServiceError>;
}

/// `reqwest`-backed client for the comments service.
pub struct HttpCommentService {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCommentService {
    /// Builds a client rooted at `base_url` (e.g. `http://localhost:8000`).
    ///
    /// `timeout` bounds each request end to end; an expired request surfaces as
    /// [`ServiceError::Network`].
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidUrl` if `base_url` is not an absolute
    /// http(s)-style URL, and `ServiceError::Network` if the TLS backend cannot
    /// be initialised.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let raw = base_url.into();
        let invalid = |reason: String| ServiceError::InvalidUrl { url: raw.clone(), reason };
        let mut base_url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a base url".to_owned()));
        }
        base_url.set_query(None);
        base_url.set_fragment(None);
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded as one path segment.
    fn url_with(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always yields segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn collection_url(&self) -> Url {
        self.url_with(&["comments"])
    }

    fn list_url(&self, order: SortOrder) -> Url {
        match order.path_segment() {
            Some(segment) => self.url_with(&["comments", segment]),
            None => self.collection_url(),
        }
    }

    fn item_url(&self, id: &CommentId) -> Url {
        self.url_with(&["comments", id.as_str()])
    }

    /// Maps non-success statuses to `ServiceError::Status`, passing success through.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ServiceError::Status { status: status.as_u16(), body })
    }

    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ServiceError> {
        let resp = Self::check(resp).await?;
        resp.json::<R>()
            .await
            .map_err(|e| ServiceError::Decode(format!("response body: {e}")))
    }
}

#[async_trait]
impl CommentService for HttpCommentService {
    async fn list(&self, order: SortOrder) -> Result<Vec<Comment>, ServiceError> {
        let resp = self.http.get(self.list_url(order)).send().await?;
        Self::parse(resp).await
    }

    async fn create(&self, text: &str) -> Result<Comment, ServiceError> {
        let resp = self
            .http
            .post(self.collection_url())
            .json(&CommentText { text })
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn update(&self, id: &CommentId, text: &str) -> Result<Comment, ServiceError> {
        let resp = self
            .http
            .put(self.item_url(id))
            .json(&CommentText { text })
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn delete(&self, id: &CommentId) -> Result<(), ServiceError> {
        let resp = self.http.delete(self.item_url(id)).send().await?;
        Self::check(resp).await.map(drop)
    }
}
