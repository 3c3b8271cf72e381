//! Unified error type for the ashare workspace.

use thiserror::Error;

/// Failure to obtain or process daily data.
///
/// Every error carries enough context to identify the failing source and
/// instrument; wrapped pipeline failures keep the original error as a
/// structured cause chain so callers can inspect the root cause without
/// parsing messages.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream source signaled throttling.
    #[error("[{fetcher}] rate limited: {msg}")]
    RateLimited {
        /// Name of the source that throttled us.
        fetcher: String,
        /// Human-readable detail from the upstream response.
        msg: String,
    },

    /// The upstream source is unreachable or structurally broken.
    #[error("[{fetcher}] source unavailable: {msg}")]
    SourceUnavailable {
        /// Name of the unreachable source.
        fetcher: String,
        /// Human-readable transport or shape detail.
        msg: String,
    },

    /// Raw acquisition returned zero rows for the requested window.
    #[error("[{fetcher}] no data returned for {stock_code}")]
    Empty {
        /// Name of the source that came back empty.
        fetcher: String,
        /// Instrument the request was for.
        stock_code: String,
    },

    /// A failure anywhere in one source's pipeline, re-wrapped with source
    /// and instrument context.
    #[error("[{fetcher}] {stock_code}: {msg}")]
    Source {
        /// Name of the failing source.
        fetcher: String,
        /// Instrument the request was for.
        stock_code: String,
        /// Message of the underlying failure.
        msg: String,
        /// The underlying failure, preserved for diagnostics.
        #[source]
        cause: Option<Box<FetchError>>,
    },

    /// A cell or payload could not be parsed into its canonical type.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input argument or construction.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Every configured source failed or returned empty; the per-source
    /// diagnostics are joined one per line, in priority order.
    #[error("all sources failed for {stock_code}:\n{}", .failures.join("\n"))]
    AllSourcesFailed {
        /// Instrument the request was for.
        stock_code: String,
        /// Labeled diagnostics, one per attempted source.
        failures: Vec<String>,
    },
}

impl FetchError {
    /// Helper: build a `RateLimited` error.
    pub fn rate_limited(fetcher: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::RateLimited {
            fetcher: fetcher.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceUnavailable` error.
    pub fn unavailable(fetcher: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            fetcher: fetcher.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `Empty` error.
    pub fn empty(fetcher: impl Into<String>, stock_code: impl Into<String>) -> Self {
        Self::Empty {
            fetcher: fetcher.into(),
            stock_code: stock_code.into(),
        }
    }

    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Wrap a pipeline failure with source and instrument context, keeping
    /// the original error as the cause.
    pub fn wrap(fetcher: impl Into<String>, stock_code: impl Into<String>, cause: Self) -> Self {
        Self::Source {
            fetcher: fetcher.into(),
            stock_code: stock_code.into(),
            msg: cause.to_string(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Walk the cause chain down to the innermost error.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Source {
                cause: Some(inner), ..
            } => inner.root_cause(),
            other => other,
        }
    }
}

impl From<chrono::ParseError> for FetchError {
    fn from(err: chrono::ParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<rust_decimal::Error> for FetchError {
    fn from(err: rust_decimal::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
