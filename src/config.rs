//! Process configuration resolved from the environment at startup.
//!
//! [`ServerConfig::load`] reads an optional `.env` file before resolving variables, and
//! [`ServerConfig::from_lookup`] accepts any lookup closure so tests never mutate the process
//! environment. Empty values are treated as missing.

// std
use std::{
	net::{IpAddr, Ipv4Addr, SocketAddr},
	path::PathBuf,
};
// self
use crate::{
	_prelude::*,
	auth::ClientSecret,
	error::ConfigError,
	obs::logging::LogFormat,
	provider::{CountryCode, Environment, LinkSettings, Product},
};

/// Fully validated server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
	/// Aggregator environment selecting the API host.
	pub environment: Environment,
	/// Aggregator client identifier.
	pub client_id: String,
	/// Aggregator API secret.
	pub secret: ClientSecret,
	/// Listen address.
	pub host: IpAddr,
	/// Listen port.
	pub port: u16,
	/// Settings sent with every link-token request.
	pub link: LinkSettings,
	/// Log output format.
	pub log_format: LogFormat,
	/// What happened to the optional `.env` file.
	pub env_file: EnvFile,
}
impl ServerConfig {
	/// Port used when `PORT` is unset.
	pub const DEFAULT_PORT: u16 = 5000;
	/// Listen address used when `HOST` is unset.
	pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

	/// Loads `.env` (when present) and resolves the process environment.
	///
	/// The `.env` outcome is kept in [`ServerConfig::env_file`] because the subscriber is
	/// installed from this configuration; call [`EnvFile::log`] once logging is up.
	pub fn load() -> Result<Self, ConfigError> {
		let env_file = match dotenvy::dotenv() {
			Ok(path) => EnvFile::Loaded(path),
			Err(e) if e.not_found() => EnvFile::NotFound,
			Err(e) => EnvFile::Unreadable(e.to_string()),
		};

		Ok(Self { env_file, ..Self::from_env()? })
	}

	/// Resolves configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Resolves configuration through `lookup`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
		let client_id =
			var("PLAID_CLIENT_ID").ok_or(ConfigError::MissingVar { name: "PLAID_CLIENT_ID" })?;
		let secret = var("PLAID_SECRET").ok_or(ConfigError::MissingVar { name: "PLAID_SECRET" })?;
		let environment = match var("PLAID_ENV") {
			Some(value) => value.parse()?,
			None => Environment::default(),
		};
		let port = match var("PORT") {
			Some(value) => value
				.trim()
				.parse()
				.map_err(|_| ConfigError::InvalidValue { name: "PORT", value })?,
			None => Self::DEFAULT_PORT,
		};
		let host = match var("HOST") {
			Some(value) => value
				.trim()
				.parse()
				.map_err(|_| ConfigError::InvalidValue { name: "HOST", value })?,
			None => Self::DEFAULT_HOST,
		};
		let log_format = match var("LOG_FORMAT") {
			Some(value) => value.parse()?,
			None => LogFormat::default(),
		};
		let link = link_settings(&var)?;

		Ok(Self {
			environment,
			client_id,
			secret: ClientSecret::new(secret),
			host,
			port,
			link,
			log_format,
			env_file: EnvFile::NotFound,
		})
	}

	/// Socket address the server binds to.
	pub fn socket_addr(&self) -> SocketAddr {
		SocketAddr::new(self.host, self.port)
	}

	/// Whether debug-level logging should be enabled by default.
	pub fn verbose_logging(&self) -> bool {
		!self.environment.is_production()
	}
}

/// Outcome of reading the optional `.env` file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EnvFile {
	/// Variables were loaded from this path.
	Loaded(PathBuf),
	/// No `.env` file was found, or none was read.
	#[default]
	NotFound,
	/// A `.env` file exists but could not be parsed.
	Unreadable(String),
}
impl EnvFile {
	/// Emits the outcome through the installed subscriber.
	pub fn log(&self) {
		match self {
			EnvFile::Loaded(path) => tracing::debug!(path = %path.display(), "Loaded .env file."),
			EnvFile::NotFound => {},
			EnvFile::Unreadable(error) => tracing::warn!(%error, "Ignoring unreadable .env file."),
		}
	}
}

fn link_settings(var: &impl Fn(&str) -> Option<String>) -> Result<LinkSettings, ConfigError> {
	let defaults = LinkSettings::default();
	let mut builder = LinkSettings::builder(
		var("PLAID_CLIENT_NAME").unwrap_or(defaults.client_name),
	)
	.language(var("PLAID_LANGUAGE").unwrap_or(defaults.language));

	builder = match var("PLAID_PRODUCTS") {
		Some(value) => builder.products(
			split_list(&value).map(str::parse::<Product>).collect::<Result<Vec<_>, _>>()?,
		),
		None => builder.products(defaults.products),
	};
	builder = match var("PLAID_COUNTRY_CODES") {
		Some(value) => builder.country_codes(
			split_list(&value).map(CountryCode::new).collect::<Result<Vec<_>, _>>()?,
		),
		None => builder.country_codes(defaults.country_codes),
	};

	Ok(builder.build()?)
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
	value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::provider::LinkSettingsError;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars = vars
			.iter()
			.map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
			.collect::<HashMap<_, _>>();

		move |name| vars.get(name).cloned()
	}

	#[test]
	fn minimal_environment_uses_defaults() {
		let config = ServerConfig::from_lookup(lookup(&[
			("PLAID_CLIENT_ID", "client-1"),
			("PLAID_SECRET", "secret-1"),
		]))
		.expect("Minimal configuration should load.");

		assert_eq!(config.environment, Environment::Sandbox);
		assert_eq!(config.client_id, "client-1");
		assert_eq!(config.secret.expose(), "secret-1");
		assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
		assert_eq!(config.link, LinkSettings::default());
		assert_eq!(config.log_format, LogFormat::Pretty);
		assert_eq!(config.env_file, EnvFile::NotFound);
		assert!(config.verbose_logging());
	}

	#[test]
	fn missing_or_empty_credentials_are_fatal() {
		let err = ServerConfig::from_lookup(lookup(&[("PLAID_SECRET", "secret-1")]))
			.expect_err("Missing client id should fail.");

		assert!(matches!(err, ConfigError::MissingVar { name: "PLAID_CLIENT_ID" }));

		let err = ServerConfig::from_lookup(lookup(&[
			("PLAID_CLIENT_ID", "client-1"),
			("PLAID_SECRET", "  "),
		]))
		.expect_err("Blank secret should fail.");

		assert!(matches!(err, ConfigError::MissingVar { name: "PLAID_SECRET" }));
		assert_eq!(err.to_string(), "PLAID_SECRET must be set in the environment or .env file.");
	}

	#[test]
	fn invalid_environment_and_port_are_rejected() {
		let err = ServerConfig::from_lookup(lookup(&[
			("PLAID_CLIENT_ID", "client-1"),
			("PLAID_SECRET", "secret-1"),
			("PLAID_ENV", "staging"),
		]))
		.expect_err("Unknown environment should fail.");

		assert!(matches!(err, ConfigError::InvalidEnvironment { .. }));

		let err = ServerConfig::from_lookup(lookup(&[
			("PLAID_CLIENT_ID", "client-1"),
			("PLAID_SECRET", "secret-1"),
			("PORT", "eighty"),
		]))
		.expect_err("Non-numeric port should fail.");

		assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));
	}

	#[test]
	fn link_settings_are_read_from_lists() {
		let config = ServerConfig::from_lookup(lookup(&[
			("PLAID_CLIENT_ID", "client-1"),
			("PLAID_SECRET", "secret-1"),
			("PLAID_ENV", "production"),
			("PLAID_PRODUCTS", "transactions, balance"),
			("PLAID_COUNTRY_CODES", "us,ca"),
			("PLAID_CLIENT_NAME", "Budget Buddy"),
			("HOST", "0.0.0.0"),
			("PORT", "8080"),
			("LOG_FORMAT", "json"),
		]))
		.expect("Full configuration should load.");

		assert_eq!(config.link.products, vec![Product::Transactions, Product::Balance]);
		assert_eq!(
			config.link.country_codes.iter().map(CountryCode::as_str).collect::<Vec<_>>(),
			["US", "CA"]
		);
		assert_eq!(config.link.client_name, "Budget Buddy");
		assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
		assert_eq!(config.log_format, LogFormat::Json);
		assert!(!config.verbose_logging());

		let err = ServerConfig::from_lookup(lookup(&[
			("PLAID_CLIENT_ID", "client-1"),
			("PLAID_SECRET", "secret-1"),
			("PLAID_PRODUCTS", "auth,checking"),
		]))
		.expect_err("Unknown products should fail.");

		assert!(matches!(
			err,
			ConfigError::LinkSettings(LinkSettingsError::UnknownProduct { .. })
		));
	}
}
