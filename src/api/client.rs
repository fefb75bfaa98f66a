//! REST API client
//!
//! Thin layer over [`HttpClient`]: resolves API paths against the
//! configured server, decodes JSON results and walks paginated
//! collections by following `rel="next"` links.

use super::paths::{append_params, build_api_url};
use crate::auth::provider_from_config;
use crate::config::ClientConfig;
use crate::engine::{PageWalker, WalkConfig, WalkStats};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::PaginationConfig;
use crate::types::{JsonObject, Method, StringMap};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "per_page";

/// Client for a single API server
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    page_size: u32,
    pagination: PaginationConfig,
}

impl ApiClient {
    /// Create a client for `base_url` on top of an HTTP client
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            page_size: 100,
            pagination: PaginationConfig::default(),
        }
    }

    /// Create an authenticated client from a config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(config.http_client_config(), provider_from_config(config))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
            pagination: config.pagination.clone(),
        })
    }

    /// Set the default page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set how the next page is found
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// How the next page is found
    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }

    /// Default page size
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Absolute API URL for `path` with `params` appended
    ///
    /// Parameters are appended in key order.
    pub fn api_url(&self, path: &str, params: &StringMap) -> Result<String> {
        let url = build_api_url(&self.base_url, path)?;
        let sorted: BTreeMap<&String, &String> = params.iter().collect();
        Ok(append_params(&url, sorted))
    }

    /// Request returning a single JSON object
    pub async fn single_object(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<JsonObject> {
        let text = self.send(method, path, body).await?;
        self.parse_body(&text)
    }

    /// Request returning a JSON array of objects
    pub async fn single_array(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Vec<JsonObject>> {
        let text = self.send(method, path, body).await?;
        self.parse_body(&text)
    }

    /// Request whose response body is ignored
    pub async fn void_result(&self, method: Method, path: &str, body: Option<&Value>) -> Result<()> {
        self.send(method, path, body).await?;
        Ok(())
    }

    /// Walk every page of a collection
    ///
    /// `per_page=<page_size>` is added to `params`. `handler` receives each
    /// page and returns `false` to stop. Pages are followed through the
    /// configured pagination (the `rel="next"` Link header by default).
    pub async fn for_each_page<F>(
        &self,
        path: &str,
        params: &StringMap,
        page_size: u32,
        handler: F,
    ) -> Result<WalkStats>
    where
        F: FnMut(Vec<JsonObject>) -> bool,
    {
        self.walk_pages(path, params, page_size, WalkConfig::default(), handler)
            .await
    }

    /// Same as [`ApiClient::for_each_page`] with explicit walk limits
    pub async fn walk_pages<F>(
        &self,
        path: &str,
        params: &StringMap,
        page_size: u32,
        walk_config: WalkConfig,
        handler: F,
    ) -> Result<WalkStats>
    where
        F: FnMut(Vec<JsonObject>) -> bool,
    {
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }

        let mut effective = params.clone();
        effective.insert(PAGE_SIZE_PARAM.to_string(), page_size.to_string());
        let first_url = self.api_url(path, &effective)?;
        debug!("Walking pages from {first_url}");

        let paginator = self.pagination.build();
        PageWalker::new(&self.http, paginator.as_ref())
            .with_config(walk_config)
            .walk(&first_url, handler)
            .await
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<String> {
        let url = build_api_url(&self.base_url, path)?;
        let response = self.http.request(method, &url, body).await?;
        Ok(response.text().await?)
    }

    fn parse_body<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        if text.trim().is_empty() {
            return Err(Error::empty_response(
                self.http.config().service_name.as_str(),
            ));
        }
        Ok(serde_json::from_str(text)?)
    }
}
