//! Transport primitives for aggregator API calls.
//!
//! [`ApiTransport`] is the bridge's only dependency on an HTTP stack. The client adapter hands
//! it a target URL plus an encoded JSON body and gets back the raw status and body bytes, so
//! status classification and error-body parsing stay in one place regardless of transport.
//! [`ReqwestTransport`] is the default implementation.

// crates.io
use reqwest::header::{ACCEPT, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, UnexpectedError},
};

/// Boxed future returned by [`ApiTransport::post_json`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpReply, UnexpectedError>> + 'a + Send>>;

/// Header pinning the aggregator API version the wire types were written against.
pub const API_VERSION_HEADER: &str = "Plaid-Version";
/// API version sent with every request.
pub const API_VERSION: &str = "2020-09-14";

/// Abstraction over HTTP transports capable of POSTing JSON to the aggregator.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by every
/// request handler, and the returned future must be `Send` so handlers can run on the
/// multi-threaded runtime. Only failures that prevent obtaining a response (DNS, TCP, TLS,
/// timeouts) are errors; any HTTP status, successful or not, is an [`HttpReply`].
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `body` (already-encoded JSON) to `url` and returns the raw reply.
	fn post_json(&self, url: Url, body: Vec<u8>) -> TransportFuture<'_>;
}

/// Raw HTTP reply captured by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl HttpReply {
	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The default client applies no timeout; a request blocks until the aggregator answers or
/// the connection fails.
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a transport whose client identifies itself with `user_agent`.
	pub fn with_user_agent(user_agent: &str) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.user_agent(user_agent)
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Debug for ReqwestTransport {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestTransport(..)")
	}
}
impl ApiTransport for ReqwestTransport {
	fn post_json(&self, url: Url, body: Vec<u8>) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client
				.post(url)
				.header(CONTENT_TYPE, "application/json")
				.header(ACCEPT, "application/json")
				.header(API_VERSION_HEADER, API_VERSION)
				.body(body)
				.send()
				.await
				.map_err(UnexpectedError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(UnexpectedError::from)?.to_vec();

			Ok(HttpReply { status, body })
		})
	}
}
