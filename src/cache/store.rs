//! Memo cache storage.
//!
//! Each key owns a [`OnceCell`]. The first caller for a key runs the supplier
//! while concurrent callers for the same key wait on the same cell, so a value
//! is computed at most once. A failed computation leaves the cell empty and the
//! next caller runs the supplier again. Entries are never evicted.

use std::{convert::Infallible, fmt::Display, future::Future, sync::Arc};

use dashmap::DashMap;
use metrics::counter;
use tokio::sync::OnceCell;
use tracing::debug;

use super::config::CacheConfig;

pub(crate) const METRIC_CACHE_HIT: &str = "digest_cache_hit_total";
pub(crate) const METRIC_CACHE_MISS: &str = "digest_cache_miss_total";
pub(crate) const METRIC_CACHE_COMPUTE_ERROR: &str = "digest_cache_compute_error_total";

/// Per-call options for [`MemoCache::get_or_try_compute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeOptions {
    /// Log the hit/miss outcome at debug level.
    pub debug: bool,
}

impl ComputeOptions {
    pub fn debug(debug: bool) -> Self {
        Self { debug }
    }
}

/// Process-lifetime key → value store with single-flight population.
pub struct MemoCache<V> {
    name: &'static str,
    enabled: bool,
    entries: DashMap<String, Arc<OnceCell<V>>>,
}

impl<V> MemoCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty cache. `name` labels log events and metrics.
    pub fn new(name: &'static str, config: &CacheConfig) -> Self {
        Self {
            name,
            enabled: config.enabled,
            entries: DashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return the value stored under `key`, running `supplier` to produce it on
    /// the first call. Supplier errors are returned unchanged and nothing is
    /// stored.
    pub async fn get_or_try_compute<F, Fut, E>(
        &self,
        key: &str,
        options: ComputeOptions,
        supplier: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Display,
    {
        if !self.enabled {
            self.record(key, options, Outcome::Bypass);
            return supplier().await;
        }

        let cell = self.cell(key);
        if let Some(value) = cell.get() {
            self.record(key, options, Outcome::Hit);
            return Ok(value.clone());
        }

        let mut computed = false;
        let result = cell
            .get_or_try_init(|| {
                computed = true;
                supplier()
            })
            .await;

        match result {
            Ok(value) => {
                // Callers that waited on another in-flight computation are hits.
                let outcome = if computed { Outcome::Miss } else { Outcome::Hit };
                self.record(key, options, outcome);
                Ok(value.clone())
            }
            Err(error) => {
                counter!(METRIC_CACHE_COMPUTE_ERROR, "cache" => self.name).increment(1);
                if options.debug {
                    debug!(
                        cache = self.name,
                        key,
                        outcome = "error",
                        error = %error,
                        "memo cache computation failed"
                    );
                }
                Err(error)
            }
        }
    }

    /// Infallible variant of [`Self::get_or_try_compute`].
    pub async fn get_or_compute<F, Fut>(&self, key: &str, options: ComputeOptions, supplier: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let result = self
            .get_or_try_compute(key, options, || async move {
                Ok::<V, Infallible>(supplier().await)
            })
            .await;
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Whether a computed value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|cell| cell.initialized())
    }

    /// Number of keys holding a computed value.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, key: &str) -> Arc<OnceCell<V>> {
        if let Some(existing) = self.entries.get(key) {
            return Arc::clone(existing.value());
        }
        // The map guard must not live across an await point; clone the cell out.
        Arc::clone(self.entries.entry(key.to_owned()).or_default().value())
    }

    fn record(&self, key: &str, options: ComputeOptions, outcome: Outcome) {
        match outcome {
            Outcome::Hit => counter!(METRIC_CACHE_HIT, "cache" => self.name).increment(1),
            Outcome::Miss | Outcome::Bypass => {
                counter!(METRIC_CACHE_MISS, "cache" => self.name).increment(1)
            }
        }
        if options.debug {
            debug!(
                cache = self.name,
                key,
                outcome = outcome.as_str(),
                "memo cache lookup"
            );
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Hit,
    Miss,
    Bypass,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Hit => "hit",
            Outcome::Miss => "miss",
            Outcome::Bypass => "bypass",
        }
    }
}
