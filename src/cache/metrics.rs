use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Tracks performance counters for bundle loading and caching
#[derive(Debug, Default)]
pub struct CacheMetrics {
    load_times: RwLock<HashMap<String, Duration>>,
    load_counts: RwLock<HashMap<String, u64>>,
    hits: AtomicU64,
    misses: AtomicU64,
    resident_bytes: AtomicU64,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the parse time for a URL
    pub fn record_load_time(&self, url: String, duration: Duration) {
        self.load_times.write().insert(url, duration);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record resident memory for a URL's bundle
    pub fn record_memory_usage(&self, url: String, bytes: usize) {
        self.resident_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
        let mut counts = self.load_counts.write();
        *counts.entry(url).or_insert(0) += 1;
    }

    /// Cache hit rate as a percentage
    pub fn hit_rate(&self) -> f32 {
        let hits = self.hits.load(Ordering::Relaxed) as f32;
        let misses = self.misses.load(Ordering::Relaxed) as f32;

        if hits + misses > 0.0 {
            hits / (hits + misses) * 100.0
        } else {
            0.0
        }
    }

    /// Total bytes attributed to cached bundles
    pub fn resident_bytes(&self) -> u64 {
        self.resident_bytes.load(Ordering::Relaxed)
    }

    /// Most recent parse time for a URL
    pub fn load_time(&self, url: &str) -> Option<Duration> {
        self.load_times.read().get(url).cloned()
    }

    /// Number of times a URL's bundle was loaded or seeded
    pub fn load_count(&self, url: &str) -> u64 {
        *self.load_counts.read().get(url).unwrap_or(&0)
    }
}

/// A thread-safe, clonable wrapper around [`CacheMetrics`]
#[derive(Debug, Clone, Default)]
pub struct CacheMetricsHandle(Arc<CacheMetrics>);

impl CacheMetricsHandle {
    pub fn new() -> Self {
        Self(Arc::new(CacheMetrics::new()))
    }

    /// Get a reference to the underlying metrics
    pub fn inner(&self) -> &CacheMetrics {
        &self.0
    }
}

impl std::ops::Deref for CacheMetricsHandle {
    type Target = CacheMetrics;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_starts_at_zero() {
        let metrics = CacheMetrics::new();
        assert_eq!(metrics.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_percentage() {
        let metrics = CacheMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        assert!((metrics.hit_rate() - 66.6667).abs() < 0.01);
    }

    #[test]
    fn test_memory_and_load_counts() {
        let metrics = CacheMetrics::new();
        metrics.record_memory_usage("a.glb".to_string(), 1024);
        metrics.record_memory_usage("a.glb".to_string(), 1024);

        assert_eq!(metrics.resident_bytes(), 2048);
        assert_eq!(metrics.load_count("a.glb"), 2);
        assert_eq!(metrics.load_count("b.glb"), 0);
    }

    #[test]
    fn test_handle_shares_counters() {
        let handle = CacheMetricsHandle::new();
        let clone = handle.clone();
        handle.record_hit();
        assert_eq!(clone.hit_rate(), 100.0);
    }
}
