use blog_types::{
    entity::Id,
    post::{Post, PostInput, PostPage, PostPatch},
};
use tracing::{debug, error};

use super::{
    cache::ClientCache, error::Error, operation::Operation, response::ClientResponse,
};
use std::sync::Arc;

/// Whether a query may be answered from the in-memory cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Serve a cached response when there is one, go to the network otherwise.
    #[default]
    CacheFirst,
    /// Always go to the network and refresh the cached response.
    NetworkOnly,
}

/// Configuration for the client.
/// endpoint: GraphQL endpoint. (default: http://localhost:1338/graphql)
/// timeout_ms: Per-request timeout. (default: 30s)
/// fetch_policy: Policy for queries. (default: cache first)
/// cache_max_age_s: Age after which cached responses are no longer served. (default: 1 hour)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
    pub fetch_policy: Option<FetchPolicy>,
    pub cache_max_age_s: Option<i64>,
}

impl Config {
    const DEFAULT_ENDPOINT: &'static str = "http://localhost:1338/graphql";
    const DEFAULT_TIMEOUT_MS: u64 = 30_000;
    const DEFAULT_CACHE_MAX_AGE_S: i64 = 60 * 60;

    pub fn new(endpoint: Option<String>, fetch_policy: Option<FetchPolicy>) -> Self {
        Config {
            endpoint,
            fetch_policy,
            ..Default::default()
        }
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(Self::DEFAULT_ENDPOINT)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms.unwrap_or(Self::DEFAULT_TIMEOUT_MS))
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        self.fetch_policy.unwrap_or_default()
    }

    pub fn cache_max_age(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache_max_age_s.unwrap_or(Self::DEFAULT_CACHE_MAX_AGE_S))
    }
}

/// A client for a Strapi-style GraphQL content backend.
/// One instance is built at start-up and shared by every view; clones share the
/// connection pool and the query cache.
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
    http: reqwest::Client,
    cache: Arc<ClientCache>,
}

impl Client {
    /// Must be called inside a tokio runtime, the query cache runs as a task.
    pub fn new(cfg: Option<Config>) -> Result<Self, Error> {
        let cfg = cfg.unwrap_or_default();
        let http = reqwest::Client::builder().timeout(cfg.timeout()).build()?;
        let cache = Arc::new(ClientCache::new(cfg.cache_max_age()));
        Ok(Self { cfg, http, cache })
    }

    pub fn endpoint(&self) -> &str {
        self.cfg.endpoint()
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        self.cfg.fetch_policy()
    }

    fn new_request(&self, operation: &Operation) -> reqwest::RequestBuilder {
        self.http
            .post(self.cfg.endpoint())
            .json(&operation.request())
    }

    /// Send `operation` over the network. Query responses refresh the cache,
    /// a successful mutation clears it since any cached list may now be stale.
    pub async fn execute(&self, operation: &Operation) -> Result<ClientResponse, Error> {
        debug!("Sending {} to {}", operation, self.cfg.endpoint());
        let resp = self.new_request(operation).send().await.map_err(|e| {
            error!("request {} failed: {}", operation, e);
            e
        })?;
        self.handle_response(operation, resp).await
    }

    pub async fn handle_response(
        &self,
        operation: &Operation,
        resp: reqwest::Response,
    ) -> Result<ClientResponse, Error> {
        match resp.status() {
            reqwest::StatusCode::OK => {
                debug!("request: {} status: OK", operation);
                let parsed = ClientResponse::parse(operation, resp).await.map_err(|e| {
                    error!("request {} returned an unusable body: {}", operation, e);
                    e
                })?;
                if operation.is_mutation() {
                    self.cache.clear().await;
                } else {
                    self.cache.update(operation.clone(), parsed.clone()).await;
                }
                Ok(parsed)
            }
            status => {
                error!("request {} status: {}", operation, status);
                Err(Error::StatusCode(status.as_u16()))
            }
        }
    }

    /// Run a query with the configured fetch policy.
    pub async fn query(&self, operation: &Operation) -> Result<ClientResponse, Error> {
        self.query_with_policy(operation, self.cfg.fetch_policy())
            .await
    }

    /// Run a query bypassing the cache.
    pub async fn refetch(&self, operation: &Operation) -> Result<ClientResponse, Error> {
        self.query_with_policy(operation, FetchPolicy::NetworkOnly)
            .await
    }

    pub async fn query_with_policy(
        &self,
        operation: &Operation,
        policy: FetchPolicy,
    ) -> Result<ClientResponse, Error> {
        if policy == FetchPolicy::CacheFirst && !operation.is_mutation() {
            if let Some(entry) = self.cache.lookup(operation.clone()).await {
                debug!("Serving {} from cache", operation);
                return Ok(entry.response);
            }
        }
        self.execute(operation).await
    }

    /// Last cached response for `operation`, if any, without touching the network.
    pub async fn cached(&self, operation: &Operation) -> Option<ClientResponse> {
        self.cache
            .lookup(operation.clone())
            .await
            .map(|entry| entry.response)
    }

    pub async fn get_posts(&self) -> Result<Arc<Vec<Post>>, Error> {
        self.query(&Operation::Posts).await?.into_posts()
    }

    pub async fn get_posts_page(&self, page: u32, page_size: u32) -> Result<Arc<PostPage>, Error> {
        self.query(&Operation::PostsPage { page, page_size })
            .await?
            .into_page()
    }

    pub async fn get_post_by_id(&self, id: &Id) -> Result<Option<Arc<Post>>, Error> {
        self.query(&Operation::PostById(id.clone()))
            .await?
            .into_post()
    }

    pub async fn get_posts_by_title(&self, title: &str) -> Result<Arc<Vec<Post>>, Error> {
        self.query(&Operation::PostByTitle(title.to_string()))
            .await?
            .into_posts()
    }

    pub async fn create_post(&self, input: PostInput) -> Result<Arc<Post>, Error> {
        self.execute(&Operation::CreatePost(input))
            .await?
            .into_written()
    }

    pub async fn update_post(&self, id: &Id, patch: PostPatch) -> Result<Arc<Post>, Error> {
        self.execute(&Operation::UpdatePost(id.clone(), patch))
            .await?
            .into_written()
    }

    pub async fn delete_post(&self, id: &Id) -> Result<Arc<Post>, Error> {
        self.execute(&Operation::DeletePost(id.clone()))
            .await?
            .into_written()
    }
}
