//! Plaid API environments and their hosts.

// self
use crate::{_prelude::*, error::ConfigError};

/// Plaid API environments; each selects a fixed API host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// Test credentials and fake institutions.
	#[default]
	Sandbox,
	/// Live institutions with a capped item count.
	Development,
	/// Live institutions, billed usage.
	Production,
}
impl Environment {
	/// Returns the lowercase label accepted by `PLAID_ENV`.
	pub const fn as_str(self) -> &'static str {
		match self {
			Environment::Sandbox => "sandbox",
			Environment::Development => "development",
			Environment::Production => "production",
		}
	}

	/// Returns the environment's API host.
	pub const fn host(self) -> &'static str {
		match self {
			Environment::Sandbox => "sandbox.plaid.com",
			Environment::Development => "development.plaid.com",
			Environment::Production => "production.plaid.com",
		}
	}

	/// Returns the HTTPS base URL of the environment's API host.
	pub fn base_url(self) -> Result<Url, ConfigError> {
		let raw = format!("https://{}", self.host());

		Url::parse(&raw).map_err(|source| ConfigError::InvalidBaseUrl { value: raw, source })
	}

	/// Whether this is the billed production environment.
	pub const fn is_production(self) -> bool {
		matches!(self, Environment::Production)
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Environment {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"sandbox" => Ok(Environment::Sandbox),
			"development" => Ok(Environment::Development),
			"production" => Ok(Environment::Production),
			other => Err(ConfigError::InvalidEnvironment { value: other.to_owned() }),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn environments_select_hosts() {
		let sandbox = Environment::Sandbox.base_url().expect("Sandbox host should form a URL.");
		let development =
			Environment::Development.base_url().expect("Development host should form a URL.");
		let production =
			Environment::Production.base_url().expect("Production host should form a URL.");

		assert_eq!(sandbox.as_str(), "https://sandbox.plaid.com/");
		assert_eq!(development.host_str(), Some("development.plaid.com"));
		assert_eq!(production.host_str(), Some("production.plaid.com"));
	}

	#[test]
	fn parsing_is_exact() {
		assert_eq!("sandbox".parse::<Environment>().ok(), Some(Environment::Sandbox));
		assert_eq!("production".parse::<Environment>().ok(), Some(Environment::Production));

		let err = "Sandbox".parse::<Environment>().expect_err("Labels are case-sensitive.");

		assert!(matches!(err, ConfigError::InvalidEnvironment { ref value } if value == "Sandbox"));
		assert!(err.to_string().contains("Must be 'sandbox', 'development', or 'production'"));
	}
}
