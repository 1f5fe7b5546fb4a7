use std::{
    num::NonZeroUsize,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::Response,
};
use bytes::Bytes;
use http_body_util::BodyExt;
use lru::LruCache;
use thiserror::Error;
use tokio::sync::RwLock;

/// In-process cache of rendered public responses.
///
/// Entries live for a fixed TTL and the least recently used entry is evicted
/// once `max_entries` is reached. A zero TTL disables the cache: nothing is
/// stored and every lookup misses.
#[derive(Clone)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Arc<RwLock<LruCache<String, CachedResponse>>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: NonZeroUsize) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(LruCache::new(max_entries))),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, NonZeroUsize::MIN)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub async fn get(&self, key: &str) -> Option<Response<Body>> {
        if !self.is_enabled() {
            return None;
        }
        // A hit reorders the LRU list and needs the write lock.
        let mut guard = self.entries.write().await;
        let fresh = guard
            .get(key)
            .is_some_and(|entry| entry.stored_at.elapsed() < self.ttl);
        if !fresh {
            guard.pop(key);
            return None;
        }
        guard.get(key).cloned().map(CachedResponse::into_response)
    }

    /// Store `response`, returning the key evicted to make room, if any.
    pub async fn put(&self, key: String, response: CachedResponse) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }
        let mut guard = self.entries.write().await;
        guard
            .push(key.clone(), response)
            .map(|(evicted, _)| evicted)
            .filter(|evicted| *evicted != key)
    }

    pub async fn store_response(
        &self,
        key: &str,
        response: Response,
    ) -> Result<Response, (Response, CacheStoreError)> {
        let (rebuilt, cached) = buffer_response(response).await?;
        if self.put(key.to_string(), cached).await.is_some() {
            metrics::counter!("nazim_public_cache_evictions_total").increment(1);
        }
        Ok(rebuilt)
    }

    pub async fn invalidate_all(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains(key)
    }
}

#[derive(Clone)]
pub struct CachedResponse {
    status: StatusCode,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Bytes,
    stored_at: Instant,
}

impl CachedResponse {
    pub fn new(status: StatusCode, headers: &HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers: headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            body,
            stored_at: Instant::now(),
        }
    }

    fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        for (name, value) in self.headers {
            headers.append(name, value);
        }
        response
    }
}

#[derive(Debug, Error)]
pub enum CacheStoreError {
    #[error("failed to buffer response body: {0}")]
    Buffer(String),
}

/// Only plain successful responses are worth caching.
pub fn should_store_response(response: &Response) -> bool {
    response.status() == StatusCode::OK && !response.headers().contains_key(header::SET_COOKIE)
}

pub async fn buffer_response(
    response: Response,
) -> Result<(Response, CachedResponse), (Response, CacheStoreError)> {
    let (parts, body) = response.into_parts();
    match BodyExt::collect(body).await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            let cached = CachedResponse::new(parts.status, &parts.headers, bytes.clone());
            let rebuilt = Response::from_parts(parts, Body::from(bytes));
            Ok((rebuilt, cached))
        }
        Err(error) => {
            let rebuilt = Response::from_parts(parts, Body::empty());
            Err((rebuilt, CacheStoreError::Buffer(error.to_string())))
        }
    }
}
