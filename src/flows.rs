//! Request orchestration shared by the HTTP handlers.
//!
//! [`Bridge`] owns the aggregator client, the token store, and the Link settings so each flow
//! can focus on its own validation and sequencing. Flows return typed results; shaping those
//! into responses is left to [`crate::server`].

pub mod exchange;
pub mod link_token;
pub mod transactions;

pub use transactions::*;

// crates.io
use time::UtcOffset;
// self
use crate::{_prelude::*, client::AggregatorApi, provider::LinkSettings, store::TokenStore};

/// Coordinates the link, exchange, and transactions flows for one aggregator account.
#[derive(Clone)]
pub struct Bridge {
	/// Aggregator client used for every remote call.
	pub api: Arc<dyn AggregatorApi>,
	/// Store holding exchanged access tokens.
	pub store: Arc<dyn TokenStore>,
	/// Settings sent with every link-token request.
	pub settings: LinkSettings,
	/// Offset of the server's calendar; "today" is taken in this offset.
	pub utc_offset: UtcOffset,
}
impl Bridge {
	/// Number of days covered by the transactions window, ending today.
	pub const TRANSACTION_WINDOW_DAYS: u16 = 30;
	/// Maximum number of transactions requested per lookup.
	pub const TRANSACTION_PAGE_SIZE: u32 = 100;

	/// Creates a bridge from its collaborators.
	pub fn new(
		api: Arc<dyn AggregatorApi>,
		store: Arc<dyn TokenStore>,
		settings: LinkSettings,
	) -> Self {
		Self { api, store, settings, utc_offset: UtcOffset::UTC }
	}

	/// Uses `utc_offset` when deciding the current calendar date.
	pub fn with_utc_offset(mut self, utc_offset: UtcOffset) -> Self {
		self.utc_offset = utc_offset;

		self
	}

	/// Current calendar date in the bridge's offset.
	pub fn today(&self) -> Date {
		self.date_at(OffsetDateTime::now_utc())
	}

	fn date_at(&self, now: OffsetDateTime) -> Date {
		now.to_offset(self.utc_offset).date()
	}
}
impl Debug for Bridge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Bridge")
			.field("settings", &self.settings)
			.field("utc_offset", &self.utc_offset)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::{date, datetime, offset};
	// self
	use super::*;
	use crate::{
		auth::PublicToken,
		client::{
			ApiFuture, ExchangedItem, LinkToken, LinkTokenRequest, TransactionsPage,
			TransactionsRequest,
		},
		store::MemoryStore,
	};

	struct NoApi;
	impl AggregatorApi for NoApi {
		fn create_link_token<'a>(&'a self, _: &'a LinkTokenRequest) -> ApiFuture<'a, LinkToken> {
			Box::pin(async { Err(Error::invalid_input("unused")) })
		}

		fn exchange_public_token<'a>(
			&'a self,
			_: &'a PublicToken,
		) -> ApiFuture<'a, ExchangedItem> {
			Box::pin(async { Err(Error::invalid_input("unused")) })
		}

		fn get_transactions<'a>(
			&'a self,
			_: &'a TransactionsRequest,
		) -> ApiFuture<'a, TransactionsPage> {
			Box::pin(async { Err(Error::invalid_input("unused")) })
		}
	}

	fn bridge() -> Bridge {
		Bridge::new(Arc::new(NoApi), Arc::new(MemoryStore::default()), LinkSettings::default())
	}

	#[test]
	fn today_follows_the_configured_offset() {
		let evening_in_new_york = datetime!(2024 - 03 - 15 23:30 -4);
		let utc = bridge();
		let local = bridge().with_utc_offset(offset!(-4));

		assert_eq!(utc.date_at(evening_in_new_york), date!(2024 - 03 - 16));
		assert_eq!(local.date_at(evening_in_new_york), date!(2024 - 03 - 15));
	}
}
