//! Tracing subscriber setup with format selection.
//!
//! Format is chosen via `FRAGSIM_LOG_FORMAT` (`json`, `pretty`,
//! `compact`) with TTY auto-detection as the fallback; the filter comes
//! from `RUST_LOG` or the `-v` verbosity count.

use std::io::IsTerminal;
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Structured JSON output.
    Json,
    /// Human-readable colored output.
    Pretty,
    /// Compact single-line format.
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            "compact" => Self::Compact,
            _ => Self::default(),
        })
    }
}

/// Initialize the tracing subscriber for the given verbosity count.
///
/// Respects `RUST_LOG` when set; otherwise maps `-v` counts to
/// warn/info/debug/trace.
pub fn init_tracing(verbosity: u8) -> Result<()> {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter_str = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("warn"));

    let format = std::env::var("FRAGSIM_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse::<LogFormat>().ok())
        .unwrap_or_else(|| {
            if std::io::stderr().is_terminal() {
                LogFormat::Pretty
            } else {
                LogFormat::Compact
            }
        });

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    }
    .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing_falls_back_to_default() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("PRETTY".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("bogus".parse::<LogFormat>().unwrap(), LogFormat::Compact);
    }
}
