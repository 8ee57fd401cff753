//! Aggregator client adapter.
//!
//! [`AggregatorApi`] is the seam the flows depend on: three remote operations, each resolving
//! to a typed payload or an [`Error`] that is either [`Error::Remote`] (the aggregator answered
//! with a structured failure) or [`Error::Unexpected`] (anything else). [`AggregatorClient`]
//! implements it over any [`ApiTransport`].

pub mod wire;

pub use wire::{Account, ExchangedItem, LinkToken, Transaction, TransactionsPage};

// crates.io
use serde::de::DeserializeOwned;
use time::macros::format_description;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientSecret, ClientUserId, PublicToken},
	error::{ConfigError, RemoteError, UnexpectedError},
	http::{ApiTransport, HttpReply, ReqwestTransport},
	provider::{CountryCode, Environment, Product},
};
use wire::{
	Authenticated, ErrorBody, LinkTokenCreateBody, LinkUser, PublicTokenExchangeBody,
	TransactionsGetBody, TransactionsGetOptions,
};

/// Boxed future returned by [`AggregatorApi`] operations.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Remote operations offered by the aggregator.
pub trait AggregatorApi
where
	Self: Send + Sync,
{
	/// Creates a short-lived link token used to open Link in the browser.
	fn create_link_token<'a>(&'a self, request: &'a LinkTokenRequest) -> ApiFuture<'a, LinkToken>;

	/// Exchanges a Link public token for a durable access token.
	fn exchange_public_token<'a>(
		&'a self,
		public_token: &'a PublicToken,
	) -> ApiFuture<'a, ExchangedItem>;

	/// Fetches transactions for one item within a date window.
	fn get_transactions<'a>(
		&'a self,
		request: &'a TransactionsRequest,
	) -> ApiFuture<'a, TransactionsPage>;
}

/// Parameters for [`AggregatorApi::create_link_token`].
#[derive(Clone, Debug)]
pub struct LinkTokenRequest {
	/// Per-attempt user identifier.
	pub user: ClientUserId,
	/// Application name shown inside Link.
	pub client_name: String,
	/// Products to initialize Link with.
	pub products: Vec<Product>,
	/// Country codes whose institutions Link may show.
	pub country_codes: Vec<CountryCode>,
	/// Link display language.
	pub language: String,
}

/// Inclusive calendar-date window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateWindow {
	/// First day included.
	pub start: Date,
	/// Last day included.
	pub end: Date,
}
impl DateWindow {
	/// Window ending on `end` and starting `days` calendar days earlier.
	pub fn trailing(end: Date, days: u16) -> Self {
		Self { start: end.saturating_sub(Duration::days(i64::from(days))), end }
	}

	/// Number of days between `start` and `end`.
	pub fn span_days(&self) -> i64 {
		(self.end - self.start).whole_days()
	}
}

/// Parameters for [`AggregatorApi::get_transactions`].
#[derive(Clone, Debug)]
pub struct TransactionsRequest {
	/// Credential for the item being read.
	pub access_token: AccessToken,
	/// Date window to read.
	pub window: DateWindow,
	/// Maximum number of transactions to return.
	pub count: u32,
}

/// Aggregator API endpoints used by the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
	/// `POST /link/token/create`.
	LinkTokenCreate,
	/// `POST /item/public_token/exchange`.
	ItemPublicTokenExchange,
	/// `POST /transactions/get`.
	TransactionsGet,
}
impl Endpoint {
	/// Returns the endpoint path relative to the environment host.
	pub const fn path(self) -> &'static str {
		match self {
			Endpoint::LinkTokenCreate => "/link/token/create",
			Endpoint::ItemPublicTokenExchange => "/item/public_token/exchange",
			Endpoint::TransactionsGet => "/transactions/get",
		}
	}
}

/// [`AggregatorApi`] implementation that speaks the aggregator's JSON API over a transport.
pub struct AggregatorClient<C = ReqwestTransport>
where
	C: ?Sized + ApiTransport,
{
	transport: Arc<C>,
	base_url: Url,
	client_id: String,
	secret: ClientSecret,
}
impl<C> AggregatorClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Creates a client bound to `environment`'s API host.
	pub fn with_transport(
		environment: Environment,
		client_id: impl Into<String>,
		secret: ClientSecret,
		transport: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		Ok(Self::with_base_url(environment.base_url()?, client_id, secret, transport))
	}

	/// Creates a client bound to an arbitrary base URL (mock servers, proxies).
	pub fn with_base_url(
		base_url: Url,
		client_id: impl Into<String>,
		secret: ClientSecret,
		transport: impl Into<Arc<C>>,
	) -> Self {
		Self { transport: transport.into(), base_url, client_id: client_id.into(), secret }
	}

	/// Base URL every endpoint path is resolved against.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	async fn call<Req, Res>(&self, endpoint: Endpoint, payload: Req) -> Result<Res>
	where
		Req: Serialize,
		Res: DeserializeOwned,
	{
		let mut url = self.base_url.clone();

		url.set_path(endpoint.path());

		let body = serde_json::to_vec(&Authenticated {
			client_id: &self.client_id,
			secret: self.secret.expose(),
			payload,
		})
		.map_err(UnexpectedError::RequestEncode)?;
		let reply = self.transport.post_json(url, body).await?;

		tracing::debug!(endpoint = endpoint.path(), status = reply.status, "Plaid API replied.");

		decode_reply(reply)
	}
}
impl AggregatorClient<ReqwestTransport> {
	/// Creates a client for `environment` backed by a default reqwest transport.
	pub fn new(
		environment: Environment,
		client_id: impl Into<String>,
		secret: ClientSecret,
	) -> Result<Self, ConfigError> {
		Self::with_transport(environment, client_id, secret, ReqwestTransport::default())
	}
}
impl<C> Clone for AggregatorClient<C>
where
	C: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			base_url: self.base_url.clone(),
			client_id: self.client_id.clone(),
			secret: self.secret.clone(),
		}
	}
}
impl<C> Debug for AggregatorClient<C>
where
	C: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AggregatorClient")
			.field("base_url", &self.base_url.as_str())
			.field("client_id", &self.client_id)
			.field("secret", &self.secret)
			.finish()
	}
}
impl<C> AggregatorApi for AggregatorClient<C>
where
	C: ?Sized + ApiTransport,
{
	fn create_link_token<'a>(&'a self, request: &'a LinkTokenRequest) -> ApiFuture<'a, LinkToken> {
		Box::pin(async move {
			let body = LinkTokenCreateBody {
				client_name: &request.client_name,
				user: LinkUser { client_user_id: &request.user },
				products: request.products.iter().map(|product| product.as_str()).collect(),
				country_codes: request.country_codes.iter().map(CountryCode::as_str).collect(),
				language: &request.language,
			};

			self.call(Endpoint::LinkTokenCreate, body).await
		})
	}

	fn exchange_public_token<'a>(
		&'a self,
		public_token: &'a PublicToken,
	) -> ApiFuture<'a, ExchangedItem> {
		Box::pin(async move {
			let body = PublicTokenExchangeBody { public_token: public_token.expose() };

			self.call(Endpoint::ItemPublicTokenExchange, body).await
		})
	}

	fn get_transactions<'a>(
		&'a self,
		request: &'a TransactionsRequest,
	) -> ApiFuture<'a, TransactionsPage> {
		Box::pin(async move {
			let body = TransactionsGetBody {
				access_token: request.access_token.expose(),
				start_date: format_date(request.window.start),
				end_date: format_date(request.window.end),
				options: TransactionsGetOptions { count: request.count, offset: 0 },
			};

			self.call(Endpoint::TransactionsGet, body).await.map_err(|mut err| {
				if let Error::Remote(remote) = &mut err {
					remote.scrub(request.access_token.expose());
				}

				err
			})
		})
	}
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
	date.format(format_description!("[year]-[month]-[day]"))
		.unwrap_or_else(|_| date.to_string())
}

fn decode_reply<Res>(reply: HttpReply) -> Result<Res>
where
	Res: DeserializeOwned,
{
	if reply.is_success() {
		let HttpReply { status, body } = reply;
		let mut de = serde_json::Deserializer::from_slice(&body);

		return serde_path_to_error::deserialize(&mut de)
			.map_err(|source| UnexpectedError::ResponseParse { source, status }.into());
	}

	let HttpReply { status, body } = reply;
	let Ok(raw) = serde_json::from_slice::<serde_json::Value>(&body) else {
		return Err(UnexpectedError::unexpected_status(status, &body).into());
	};
	let Ok(parsed) = serde_json::from_value::<ErrorBody>(raw.clone()) else {
		return Err(UnexpectedError::unexpected_status(status, &body).into());
	};

	Err(RemoteError {
		status,
		error_type: parsed.error_type,
		error_code: parsed.error_code,
		error_message: parsed.error_message,
		display_message: parsed.display_message,
		request_id: parsed.request_id,
		body: raw,
	}
	.into())
}
