//! Process-scoped runtime configuration.
//!
//! The surrounding orchestrator resolves its settings once (typically from
//! the environment) and installs them explicitly with [`init`]. Nothing in
//! the pipeline reaches into this state implicitly: components receive the
//! values they need through constructors, and tests isolate themselves with
//! [`reset`].

use std::sync::{Arc, PoisonError, RwLock};

static CURRENT: RwLock<Option<Arc<RuntimeConfig>>> = RwLock::new(None);

/// Settings the orchestrator resolves once per process.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Instruments to analyze, in processing order.
    pub stock_list: Vec<String>,
    /// Upper bound on concurrent per-stock lookups. The pipeline itself is
    /// sequential; this caps the external worker pool.
    pub max_workers: usize,
    /// Bounds, in seconds, for the polite pause between upstream calls.
    pub fetch_delay_secs: (f64, f64),
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stock_list: vec![],
            max_workers: 3,
            fetch_delay_secs: (1.0, 3.0),
        }
    }
}

impl RuntimeConfig {
    /// Resolve settings from the process environment.
    ///
    /// Recognized variables: `STOCK_LIST` (comma-separated codes),
    /// `MAX_WORKERS`, `FETCH_DELAY_MIN_SECS`, `FETCH_DELAY_MAX_SECS`.
    /// Unset or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary key lookup. `from_env` is this
    /// with `std::env::var`; tests supply a closure over a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let stock_list = lookup("STOCK_LIST")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let max_workers = lookup("MAX_WORKERS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.max_workers);
        let delay_min = lookup("FETCH_DELAY_MIN_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.fetch_delay_secs.0);
        let delay_max = lookup("FETCH_DELAY_MAX_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.fetch_delay_secs.1);

        Self {
            stock_list,
            max_workers,
            fetch_delay_secs: (delay_min, delay_max),
        }
    }

    /// Non-fatal configuration problems worth surfacing at startup.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.stock_list.is_empty() {
            warnings.push("STOCK_LIST is not configured".to_string());
        }
        if self.max_workers == 0 {
            warnings.push("MAX_WORKERS must be at least 1".to_string());
        }
        if self.fetch_delay_secs.0 > self.fetch_delay_secs.1 {
            warnings.push("fetch delay bounds are inverted".to_string());
        }
        warnings
    }
}

/// Install the process-wide configuration, replacing any previous value.
pub fn init(config: RuntimeConfig) {
    let mut guard = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    *guard = Some(Arc::new(config));
}

/// The currently installed configuration, if [`init`] has run.
#[must_use]
pub fn current() -> Option<Arc<RuntimeConfig>> {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Clear the installed configuration. Intended for test isolation.
pub fn reset() {
    let mut guard = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}
