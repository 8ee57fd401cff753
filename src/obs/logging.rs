//! Global tracing subscriber setup.

// crates.io
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
// self
use crate::{_prelude::*, error::ConfigError};

/// Log line format selected through `LOG_FORMAT`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
	/// Human-readable multi-line output.
	#[default]
	Pretty,
	/// One JSON object per event.
	Json,
}
impl LogFormat {
	/// Returns the configuration label.
	pub const fn as_str(self) -> &'static str {
		match self {
			LogFormat::Pretty => "pretty",
			LogFormat::Json => "json",
		}
	}
}
impl FromStr for LogFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pretty" => Ok(LogFormat::Pretty),
			"json" => Ok(LogFormat::Json),
			_ => Err(ConfigError::InvalidValue { name: "LOG_FORMAT", value: s.to_owned() }),
		}
	}
}

/// Default filter directive when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
	if verbose { "plaid_bridge=debug,tower_http=debug,info" } else { "info" }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over [`default_directive`]. Calling this twice fails with
/// [`ConfigError::Logging`].
pub fn init(format: LogFormat, verbose: bool) -> Result<(), ConfigError> {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
		.add_directive(
			"hyper=warn".parse().unwrap_or_else(|_| tracing::Level::WARN.into()),
		)
		.add_directive(
			"reqwest=warn".parse().unwrap_or_else(|_| tracing::Level::WARN.into()),
		);
	let registry = tracing_subscriber::registry().with(filter);
	let result = match format {
		LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
		LogFormat::Json =>
			registry.with(fmt::layer().json().with_current_span(true)).try_init(),
	};

	result.map_err(|e| ConfigError::Logging { message: e.to_string() })
}
