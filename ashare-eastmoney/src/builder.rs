use crate::fetcher::EastmoneyFetcher;

const DEFAULT_KLINE_BASE: &str = "https://push2his.eastmoney.com";
const DEFAULT_SNAPSHOT_BASE: &str = "https://push2.eastmoney.com";
const DEFAULT_CHIP_BASE: &str = "https://push2ex.eastmoney.com";

/// Builder for [`EastmoneyFetcher`] with overridable endpoints and
/// throttle bounds.
pub struct EastmoneyBuilder {
    client: Option<reqwest::Client>,
    kline_base: String,
    snapshot_base: String,
    chip_base: String,
    throttle_secs: (f64, f64),
}

impl Default for EastmoneyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EastmoneyBuilder {
    /// Start from the production endpoints and the default polite pause.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: None,
            kline_base: DEFAULT_KLINE_BASE.to_string(),
            snapshot_base: DEFAULT_SNAPSHOT_BASE.to_string(),
            chip_base: DEFAULT_CHIP_BASE.to_string(),
            throttle_secs: (1.0, 3.0),
        }
    }

    /// Use an existing `reqwest::Client` instead of building one.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Override the kline-history endpoint base URL.
    #[must_use]
    pub fn kline_base(mut self, base: impl Into<String>) -> Self {
        self.kline_base = base.into();
        self
    }

    /// Override the realtime-snapshot endpoint base URL.
    #[must_use]
    pub fn snapshot_base(mut self, base: impl Into<String>) -> Self {
        self.snapshot_base = base.into();
        self
    }

    /// Override the chip-distribution endpoint base URL.
    #[must_use]
    pub fn chip_base(mut self, base: impl Into<String>) -> Self {
        self.chip_base = base.into();
        self
    }

    /// Set the bounds of the randomized pause taken before each upstream
    /// call. `(0.0, 0.0)` disables the pause; tests want that.
    #[must_use]
    pub fn throttle_secs(mut self, min: f64, max: f64) -> Self {
        self.throttle_secs = (min, max);
        self
    }

    /// Build the adapter.
    ///
    /// # Panics
    /// Panics if constructing the default `reqwest::Client` fails, which is
    /// unexpected in normal environments (invalid user-agent configuration).
    #[must_use]
    pub fn build(self) -> EastmoneyFetcher {
        let client = self.client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
                )
                .build()
                .expect("failed to build reqwest client for EastmoneyFetcher")
        });
        EastmoneyFetcher::from_parts(
            client,
            self.kline_base,
            self.snapshot_base,
            self.chip_base,
            self.throttle_secs,
        )
    }
}
