// self
use crate::{_prelude::*, provider::LinkSettingsError};

/// Plaid products a Link session can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
	/// Asset reports.
	Assets,
	/// Account and routing numbers.
	Auth,
	/// Real-time balances.
	Balance,
	/// Account holder identity.
	Identity,
	/// Holdings and investment transactions.
	Investments,
	/// Loans and credit cards.
	Liabilities,
	/// Transaction history.
	Transactions,
}
impl Product {
	/// Returns the wire identifier for the product.
	pub const fn as_str(self) -> &'static str {
		match self {
			Product::Assets => "assets",
			Product::Auth => "auth",
			Product::Balance => "balance",
			Product::Identity => "identity",
			Product::Investments => "investments",
			Product::Liabilities => "liabilities",
			Product::Transactions => "transactions",
		}
	}
}
impl Display for Product {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Product {
	type Err = LinkSettingsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"assets" => Ok(Product::Assets),
			"auth" => Ok(Product::Auth),
			"balance" => Ok(Product::Balance),
			"identity" => Ok(Product::Identity),
			"investments" => Ok(Product::Investments),
			"liabilities" => Ok(Product::Liabilities),
			"transactions" => Ok(Product::Transactions),
			other => Err(LinkSettingsError::UnknownProduct { value: other.to_owned() }),
		}
	}
}

/// ISO 3166-1 alpha-2 country code, stored uppercase.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct CountryCode(pub(super) String);
impl CountryCode {
	/// Validates and normalizes a two-letter country code.
	pub fn new(value: impl AsRef<str>) -> Result<Self, LinkSettingsError> {
		let view = value.as_ref().trim();

		if view.len() != 2 || !view.chars().all(|ch| ch.is_ascii_alphabetic()) {
			return Err(LinkSettingsError::InvalidCountryCode { value: view.to_owned() });
		}

		Ok(Self(view.to_ascii_uppercase()))
	}

	/// Returns the uppercase code.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Debug for CountryCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "CountryCode({})", self.0)
	}
}
impl Display for CountryCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl From<CountryCode> for String {
	fn from(value: CountryCode) -> Self {
		value.0
	}
}
impl FromStr for CountryCode {
	type Err = LinkSettingsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
