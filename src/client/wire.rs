//! Request and response bodies for the three aggregator endpoints.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ItemId},
};

/// Envelope that prepends the client credentials to every request body.
#[derive(Serialize)]
pub(crate) struct Authenticated<'a, T>
where
	T: Serialize,
{
	pub(crate) client_id: &'a str,
	pub(crate) secret: &'a str,
	#[serde(flatten)]
	pub(crate) payload: T,
}

#[derive(Serialize)]
pub(crate) struct LinkTokenCreateBody<'a> {
	pub(crate) client_name: &'a str,
	pub(crate) user: LinkUser<'a>,
	pub(crate) products: Vec<&'static str>,
	pub(crate) country_codes: Vec<&'a str>,
	pub(crate) language: &'a str,
}

#[derive(Serialize)]
pub(crate) struct LinkUser<'a> {
	pub(crate) client_user_id: &'a str,
}

#[derive(Serialize)]
pub(crate) struct PublicTokenExchangeBody<'a> {
	pub(crate) public_token: &'a str,
}

#[derive(Serialize)]
pub(crate) struct TransactionsGetBody<'a> {
	pub(crate) access_token: &'a str,
	pub(crate) start_date: String,
	pub(crate) end_date: String,
	pub(crate) options: TransactionsGetOptions,
}

#[derive(Serialize)]
pub(crate) struct TransactionsGetOptions {
	pub(crate) count: u32,
	pub(crate) offset: u32,
}

/// Link token payload returned to the browser unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkToken {
	/// Token used to initialize Link on the client.
	pub link_token: String,
	/// RFC 3339 expiry instant, as sent by the aggregator.
	pub expiration: String,
	/// Aggregator request identifier.
	pub request_id: String,
}

/// Successful public-token exchange.
#[derive(Clone, Debug, Deserialize)]
pub struct ExchangedItem {
	/// Durable credential for the item.
	pub access_token: AccessToken,
	/// Item the credential belongs to.
	pub item_id: ItemId,
	/// Aggregator request identifier.
	pub request_id: String,
}

/// One page of transactions plus the accounts they reference.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TransactionsPage {
	/// Accounts belonging to the item.
	#[serde(default)]
	pub accounts: Vec<Account>,
	/// Transactions within the requested window, newest first.
	#[serde(default)]
	pub transactions: Vec<Transaction>,
	/// Total transactions available for the window, which may exceed the page.
	#[serde(default)]
	pub total_transactions: u32,
	/// Aggregator request identifier.
	#[serde(default)]
	pub request_id: String,
}
impl TransactionsPage {
	/// Looks up an account by identifier.
	pub fn account(&self, account_id: &str) -> Option<&Account> {
		self.accounts.iter().find(|account| account.account_id == account_id)
	}
}

/// Account summary returned alongside transactions.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Account {
	/// Account identifier.
	pub account_id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Institution-assigned name, when available.
	#[serde(default)]
	pub official_name: Option<String>,
	/// Last digits of the account number.
	#[serde(default)]
	pub mask: Option<String>,
	/// Account type, e.g. `depository`.
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	/// Account subtype, e.g. `checking`.
	#[serde(default)]
	pub subtype: Option<String>,
}

/// One transaction as reported by the aggregator; never stored locally.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Transaction {
	/// Transaction identifier.
	pub transaction_id: String,
	/// Account the transaction posted to.
	pub account_id: String,
	/// Amount; positive values are money leaving the account.
	pub amount: f64,
	/// ISO 4217 currency code.
	#[serde(default)]
	pub iso_currency_code: Option<String>,
	/// Posting (or pending) date, `YYYY-MM-DD`.
	pub date: String,
	/// Raw merchant or description string.
	#[serde(default)]
	pub name: String,
	/// Cleaned merchant name, when recognized.
	#[serde(default)]
	pub merchant_name: Option<String>,
	/// Whether the transaction has not posted yet.
	#[serde(default)]
	pub pending: bool,
	/// Legacy category hierarchy.
	#[serde(default)]
	pub category: Option<Vec<String>>,
	/// `online`, `in store`, or `other`.
	#[serde(default)]
	pub payment_channel: Option<String>,
}
impl Transaction {
	/// Best available human-readable label.
	pub fn label(&self) -> &str {
		self.merchant_name.as_deref().filter(|name| !name.is_empty()).unwrap_or(&self.name)
	}
}

/// Error body shape returned with non-2xx statuses.
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
	pub(crate) error_type: String,
	pub(crate) error_code: String,
	#[serde(default)]
	pub(crate) error_message: String,
	#[serde(default)]
	pub(crate) display_message: Option<String>,
	#[serde(default)]
	pub(crate) request_id: Option<String>,
}
