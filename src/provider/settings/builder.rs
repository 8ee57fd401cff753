// self
use crate::{
	_prelude::*,
	provider::{CountryCode, LinkSettings, Product},
};

/// Errors raised while constructing or validating link settings.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum LinkSettingsError {
	/// At least one product must be requested.
	#[error("Link settings must request at least one product.")]
	NoProducts,
	/// At least one country code must be configured.
	#[error("Link settings must allow at least one country code.")]
	NoCountryCodes,
	/// Product name is not recognized.
	#[error("Unknown Plaid product: {value}.")]
	UnknownProduct {
		/// Rejected value.
		value: String,
	},
	/// Country code is not two ASCII letters.
	#[error("Country code must be two ASCII letters: {value}.")]
	InvalidCountryCode {
		/// Rejected value.
		value: String,
	},
	/// Language must be a lowercase ASCII locale code.
	#[error("Language must be a lowercase ASCII code: {value}.")]
	InvalidLanguage {
		/// Rejected value.
		value: String,
	},
	/// Client name shown inside Link cannot be empty.
	#[error("Client name cannot be empty.")]
	EmptyClientName,
}

/// Builder for [`LinkSettings`] values.
#[derive(Debug)]
pub struct LinkSettingsBuilder {
	/// Application name shown inside Link.
	pub client_name: String,
	/// Products requested for every Link session.
	pub products: Vec<Product>,
	/// Country codes whose institutions Link may show.
	pub country_codes: Vec<CountryCode>,
	/// Link display language.
	pub language: String,
}
impl LinkSettingsBuilder {
	/// Creates a builder seeded with an empty configuration and English Link copy.
	pub fn new(client_name: impl Into<String>) -> Self {
		Self {
			client_name: client_name.into(),
			products: Vec::new(),
			country_codes: Vec::new(),
			language: LinkSettings::DEFAULT_LANGUAGE.into(),
		}
	}

	/// Adds a single product; duplicates are ignored.
	pub fn product(mut self, product: Product) -> Self {
		if !self.products.contains(&product) {
			self.products.push(product);
		}

		self
	}

	/// Adds multiple products.
	pub fn products<I>(mut self, products: I) -> Self
	where
		I: IntoIterator<Item = Product>,
	{
		for product in products.into_iter() {
			self = self.product(product);
		}

		self
	}

	/// Adds a single country code; duplicates are ignored.
	pub fn country_code(mut self, code: CountryCode) -> Self {
		if !self.country_codes.contains(&code) {
			self.country_codes.push(code);
		}

		self
	}

	/// Adds multiple country codes.
	pub fn country_codes<I>(mut self, codes: I) -> Self
	where
		I: IntoIterator<Item = CountryCode>,
	{
		for code in codes.into_iter() {
			self = self.country_code(code);
		}

		self
	}

	/// Overrides the Link display language.
	pub fn language(mut self, language: impl Into<String>) -> Self {
		self.language = language.into();

		self
	}

	/// Consumes the builder and validates the resulting settings.
	pub fn build(self) -> Result<LinkSettings, LinkSettingsError> {
		let settings = LinkSettings {
			client_name: self.client_name,
			products: self.products,
			country_codes: self.country_codes,
			language: self.language,
		};

		settings.validate()?;

		Ok(settings)
	}
}

impl LinkSettings {
	fn validate(&self) -> Result<(), LinkSettingsError> {
		if self.client_name.trim().is_empty() {
			return Err(LinkSettingsError::EmptyClientName);
		}
		if self.products.is_empty() {
			return Err(LinkSettingsError::NoProducts);
		}
		if self.country_codes.is_empty() {
			return Err(LinkSettingsError::NoCountryCodes);
		}

		validate_language(&self.language)
	}
}

fn validate_language(language: &str) -> Result<(), LinkSettingsError> {
	if language.len() < 2 || !language.chars().all(|ch| ch.is_ascii_lowercase()) {
		Err(LinkSettingsError::InvalidLanguage { value: language.to_owned() })
	} else {
		Ok(())
	}
}
