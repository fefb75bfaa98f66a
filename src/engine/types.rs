//! Engine types
//!
//! Configuration and statistics for page walks.

use serde::Serialize;

/// Configuration for a page walk
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Maximum pages to fetch (None = until the last page)
    pub max_pages: Option<usize>,
}

impl WalkConfig {
    /// Create a new walk config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max pages
    #[must_use]
    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = Some(max);
        self
    }
}

/// Why a walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The paginator found no further page
    #[default]
    LastPage,
    /// The page handler asked to stop
    Handler,
    /// The configured page limit was reached
    MaxPages,
}

/// Statistics from a page walk
#[derive(Debug, Clone, Default, Serialize)]
pub struct WalkStats {
    /// Total records received
    pub records: usize,
    /// Total pages fetched
    pub pages: usize,
    /// Why the walk ended
    pub stop_reason: StopReason,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl WalkStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn add_page(&mut self, records: usize) {
        self.pages += 1;
        self.records += records;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
