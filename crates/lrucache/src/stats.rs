//! Cache statistics tracking

/// Counters describing how `touch` calls resolved
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touch of a resident key
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Record a touch of an absent key
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Record an eviction
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Touches that promoted a resident key
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Touches that inserted a new key
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Keys dropped to make room
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Total touches observed
    pub fn touches(&self) -> u64 {
        self.hits + self.misses
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.touches();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
