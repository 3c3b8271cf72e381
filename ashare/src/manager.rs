use std::sync::Arc;

use ashare_core::{
    ChipDistribution, DailyBar, DailyRequest, FetchError, Fetcher, RealtimeQuote,
};
use ashare_eastmoney::EastmoneyFetcher;

/// Orchestrator that tries data sources in priority order until one
/// delivers.
pub struct FailoverManager {
    fetchers: Vec<Arc<dyn Fetcher>>,
}

impl std::fmt::Debug for FailoverManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailoverManager")
            .field("sources", &self.source_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for constructing a [`FailoverManager`] with custom sources.
pub struct FailoverManagerBuilder {
    fetchers: Vec<Arc<dyn Fetcher>>,
}

impl Default for FailoverManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FailoverManagerBuilder {
    /// Create a new builder with no sources registered.
    #[must_use]
    pub fn new() -> Self {
        Self { fetchers: vec![] }
    }

    /// Register a source.
    ///
    /// Registration order breaks ties between equal priorities; otherwise
    /// ordering is governed entirely by [`Fetcher::priority`].
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetchers.push(fetcher);
        self
    }

    /// Build the manager, sorting sources ascending by priority.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no sources have been registered.
    pub fn build(mut self) -> Result<FailoverManager, FetchError> {
        if self.fetchers.is_empty() {
            return Err(FetchError::invalid_arg(
                "no fetchers registered; add at least one via with_fetcher(...)",
            ));
        }
        self.fetchers.sort_by_key(|f| f.priority());
        tracing::info!(
            sources = ?self.fetchers.iter().map(|f| f.name()).collect::<Vec<_>>(),
            "failover order resolved"
        );
        Ok(FailoverManager {
            fetchers: self.fetchers,
        })
    }
}

impl FailoverManager {
    /// Start building a manager with explicit sources.
    #[must_use]
    pub fn builder() -> FailoverManagerBuilder {
        FailoverManagerBuilder::new()
    }

    /// Build a manager with the default source list: the EastMoney adapter
    /// alone.
    #[must_use]
    pub fn with_default_sources() -> Self {
        Self {
            fetchers: vec![Arc::new(EastmoneyFetcher::new_default())],
        }
    }

    /// Names of the registered sources, in failover order.
    pub fn source_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fetchers.iter().map(|f| f.name())
    }

    /// Fetch one instrument's canonical daily table from the first source
    /// that can deliver it, returning the table and the source's name.
    ///
    /// Sources are tried strictly in ascending priority order. A failing
    /// source contributes a labeled diagnostic and the scan continues; an
    /// empty-but-successful table also continues the scan. First non-empty
    /// result wins and nothing further is tried.
    ///
    /// # Errors
    /// Returns [`FetchError::AllSourcesFailed`] carrying every per-source
    /// diagnostic when no source delivers a non-empty table.
    pub async fn daily_history(
        &self,
        req: &DailyRequest,
    ) -> Result<(Vec<DailyBar>, &'static str), FetchError> {
        let mut failures: Vec<String> = Vec::new();

        for fetcher in &self.fetchers {
            tracing::info!(
                fetcher = fetcher.name(),
                stock_code = %req.stock_code,
                "trying source"
            );
            match fetcher.daily_history(req).await {
                Ok(bars) if !bars.is_empty() => return Ok((bars, fetcher.name())),
                Ok(_) => {
                    tracing::warn!(
                        fetcher = fetcher.name(),
                        stock_code = %req.stock_code,
                        "source returned an empty table; trying next"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        fetcher = fetcher.name(),
                        stock_code = %req.stock_code,
                        error = %e,
                        "source failed; trying next"
                    );
                    failures.push(format!("[{}]: {e}", fetcher.name()));
                }
            }
        }

        Err(FetchError::AllSourcesFailed {
            stock_code: req.stock_code.clone(),
            failures,
        })
    }

    /// Best-effort realtime quote from the first capable source.
    ///
    /// Failures are logged and swallowed; callers get `None` when no source
    /// can serve the quote right now. Never affects the daily pipeline.
    pub async fn realtime_quote(&self, stock_code: &str) -> Option<RealtimeQuote> {
        for fetcher in &self.fetchers {
            let Some(provider) = fetcher.as_realtime_quote_provider() else {
                continue;
            };
            match provider.realtime_quote(stock_code).await {
                Ok(quote) => return Some(quote),
                Err(e) => {
                    tracing::warn!(
                        fetcher = fetcher.name(),
                        stock_code,
                        error = %e,
                        "realtime quote lookup failed"
                    );
                }
            }
        }
        None
    }

    /// Best-effort chip distribution from the first capable source.
    ///
    /// Same contract as [`realtime_quote`](Self::realtime_quote): optional
    /// result, never an error.
    pub async fn chip_distribution(&self, stock_code: &str) -> Option<ChipDistribution> {
        for fetcher in &self.fetchers {
            let Some(provider) = fetcher.as_chip_distribution_provider() else {
                continue;
            };
            match provider.chip_distribution(stock_code).await {
                Ok(chip) => return Some(chip),
                Err(e) => {
                    tracing::warn!(
                        fetcher = fetcher.name(),
                        stock_code,
                        error = %e,
                        "chip distribution lookup failed"
                    );
                }
            }
        }
        None
    }
}
