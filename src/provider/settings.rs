//! Link session settings shared by every link-token request.

/// Builder API for assembling link settings.
pub mod builder;
/// Product and country-code vocabularies.
pub mod product;

pub use builder::*;
pub use product::*;

// self
use crate::_prelude::*;

/// Immutable Link configuration consumed by the link-token flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkSettings {
	/// Application name shown inside Link.
	pub client_name: String,
	/// Products requested for every Link session.
	pub products: Vec<Product>,
	/// Country codes whose institutions Link may show.
	pub country_codes: Vec<CountryCode>,
	/// Link display language.
	pub language: String,
}
impl LinkSettings {
	/// Application name used when none is configured.
	pub const DEFAULT_CLIENT_NAME: &'static str = "My Plaid App";
	/// Link language used when none is configured.
	pub const DEFAULT_LANGUAGE: &'static str = "en";

	/// Creates a new builder for the provided client name.
	pub fn builder(client_name: impl Into<String>) -> LinkSettingsBuilder {
		LinkSettingsBuilder::new(client_name)
	}
}
impl Default for LinkSettings {
	fn default() -> Self {
		Self {
			client_name: Self::DEFAULT_CLIENT_NAME.into(),
			products: vec![Product::Auth, Product::Transactions],
			country_codes: vec![CountryCode("US".into())],
			language: Self::DEFAULT_LANGUAGE.into(),
		}
	}
}
