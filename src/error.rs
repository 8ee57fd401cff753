//! Bridge-level error types shared across the client adapter, flows, and HTTP handlers.

// self
use crate::_prelude::*;

/// Bridge-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical request-time error exposed by public APIs.
///
/// Every handler converts these into a response; none of them reach the process level.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Client-supplied data failed a precondition.
	#[error("{reason}")]
	InvalidInput {
		/// Client-safe reason string.
		reason: String,
	},
	/// The aggregator answered with a structured failure.
	#[error(transparent)]
	Remote(#[from] RemoteError),
	/// Any other fault: network, malformed payloads, storage.
	#[error(transparent)]
	Unexpected(#[from] UnexpectedError),
}
impl Error {
	/// Builds an [`Error::InvalidInput`] from any string-like reason.
	pub fn invalid_input(reason: impl Into<String>) -> Self {
		Self::InvalidInput { reason: reason.into() }
	}

	/// Returns the coarse classification used when shaping responses.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidInput { .. } => ErrorKind::InvalidInput,
			Self::Remote(_) => ErrorKind::Remote,
			Self::Unexpected(_) => ErrorKind::Unexpected,
		}
	}
}
impl From<crate::store::StoreError> for Error {
	fn from(e: crate::store::StoreError) -> Self {
		UnexpectedError::from(e).into()
	}
}

/// Coarse error classes surfaced by [`Error::kind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
	/// See [`Error::InvalidInput`].
	InvalidInput,
	/// See [`Error::Remote`].
	Remote,
	/// See [`Error::Unexpected`].
	Unexpected,
}

/// Structured failure body returned by the aggregator.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("Plaid API returned {error_type}/{error_code} (HTTP {status}): {error_message}.")]
pub struct RemoteError {
	/// HTTP status code of the failing response.
	pub status: u16,
	/// Broad error category, e.g. `ITEM_ERROR`.
	pub error_type: String,
	/// Specific error code, e.g. `ITEM_LOGIN_REQUIRED`.
	pub error_code: String,
	/// Developer-facing description.
	pub error_message: String,
	/// End-user-facing description, when the aggregator supplies one.
	pub display_message: Option<String>,
	/// Aggregator request identifier for support tickets.
	pub request_id: Option<String>,
	/// Raw JSON body exactly as received (after secret scrubbing).
	pub body: serde_json::Value,
}
impl RemoteError {
	/// Returns the classified error category.
	pub fn kind(&self) -> RemoteErrorKind {
		RemoteErrorKind::from_error_type(&self.error_type)
	}

	/// Whether the end user must run Link again (update mode) to repair the item.
	pub fn requires_relink(&self) -> bool {
		matches!(
			self.error_code.as_str(),
			"ITEM_LOGIN_REQUIRED"
				| "PENDING_EXPIRATION"
				| "ACCESS_NOT_GRANTED"
				| "NO_ACCOUNTS"
				| "USER_PERMISSION_REVOKED"
		) || (self.kind() == RemoteErrorKind::InvalidInput
			&& self.error_code == "INVALID_ACCESS_TOKEN")
	}

	/// Replaces every occurrence of `secret` inside the raw body and message fields.
	pub fn scrub(&mut self, secret: &str) {
		if secret.is_empty() {
			return;
		}

		scrub_value(&mut self.body, secret);

		let display = self.display_message.as_mut();

		for field in [&mut self.error_message, &mut self.error_type, &mut self.error_code]
			.into_iter()
			.chain(display)
		{
			if field.contains(secret) {
				*field = field.replace(secret, REDACTED);
			}
		}
	}
}

/// Category derived from the aggregator's `error_type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteErrorKind {
	/// Malformed request (missing fields, bad JSON).
	InvalidRequest,
	/// Well-formed request carrying invalid values (bad token, bad credentials).
	InvalidInput,
	/// Request referenced an unusable result (e.g. consumed public token).
	InvalidResult,
	/// Too many requests.
	RateLimitExceeded,
	/// Aggregator-side failure.
	ApiError,
	/// The item needs attention (login required, consent expired, ...).
	ItemError,
	/// The financial institution is down or failing.
	InstitutionError,
	/// Any category this crate does not model.
	Other,
}
impl RemoteErrorKind {
	/// Maps a raw `error_type` value into a category.
	pub fn from_error_type(value: &str) -> Self {
		match value {
			"INVALID_REQUEST" => Self::InvalidRequest,
			"INVALID_INPUT" => Self::InvalidInput,
			"INVALID_RESULT" => Self::InvalidResult,
			"RATE_LIMIT_EXCEEDED" => Self::RateLimitExceeded,
			"API_ERROR" => Self::ApiError,
			"ITEM_ERROR" => Self::ItemError,
			"INSTITUTION_ERROR" => Self::InstitutionError,
			_ => Self::Other,
		}
	}
}

/// Faults that are not a structured aggregator failure.
#[derive(Debug, ThisError)]
pub enum UnexpectedError {
	/// Underlying HTTP client reported a network failure (DNS, TCP, TLS).
	#[error("Network error occurred while calling the Plaid API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete before the transport timed out.
	#[error("Request timed out while calling the Plaid API.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Request payload could not be encoded.
	#[error("Request payload could not be encoded.")]
	RequestEncode(#[source] serde_json::Error),
	/// Successful response carried JSON that does not match the expected shape.
	#[error("Plaid API returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure naming the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Failure status without a recognizable error body.
	#[error("Plaid API returned HTTP {status} without a structured error body.")]
	UnexpectedStatus {
		/// HTTP status code of the response.
		status: u16,
		/// Truncated preview of the response body.
		body_preview: String,
	},
	/// Token store failure.
	#[error(transparent)]
	Storage(#[from] crate::store::StoreError),
}
impl UnexpectedError {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Builds an [`UnexpectedError::UnexpectedStatus`] with a bounded body preview.
	pub fn unexpected_status(status: u16, body: &[u8]) -> Self {
		let text = String::from_utf8_lossy(body);
		let body_preview = if text.chars().count() <= Self::BODY_PREVIEW_LIMIT {
			text.into_owned()
		} else {
			let mut buf = text.chars().take(Self::BODY_PREVIEW_LIMIT).collect::<String>();

			buf.push('…');

			buf
		};

		Self::UnexpectedStatus { status, body_preview }
	}
}
impl From<ReqwestError> for UnexpectedError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout { source: Box::new(e) } } else { Self::network(e) }
	}
}

/// Startup configuration failures; these abort the process.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required environment variable is missing or empty.
	#[error("{name} must be set in the environment or .env file.")]
	MissingVar {
		/// Variable name.
		name: &'static str,
	},
	/// `PLAID_ENV` holds an unknown environment.
	#[error(
		"Invalid PLAID_ENV: {value}. Must be 'sandbox', 'development', or 'production'."
	)]
	InvalidEnvironment {
		/// Rejected value.
		value: String,
	},
	/// A variable holds a value that cannot be parsed.
	#[error("Invalid {name} value: {value}.")]
	InvalidValue {
		/// Variable name.
		name: &'static str,
		/// Rejected value.
		value: String,
	},
	/// An environment host did not form a valid base URL.
	#[error("Invalid API base URL: {value}.")]
	InvalidBaseUrl {
		/// Rejected URL.
		value: String,
		/// Parser failure.
		#[source]
		source: url::ParseError,
	},
	/// Link settings failed validation.
	#[error(transparent)]
	LinkSettings(#[from] crate::provider::LinkSettingsError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// The tracing subscriber could not be installed.
	#[error("Logging could not be initialized: {message}.")]
	Logging {
		/// Human-readable failure description.
		message: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

const REDACTED: &str = "<redacted>";

fn scrub_value(value: &mut serde_json::Value, secret: &str) {
	match value {
		serde_json::Value::String(text) =>
			if text.contains(secret) {
				*text = text.replace(secret, REDACTED);
			},
		serde_json::Value::Array(items) =>
			items.iter_mut().for_each(|item| scrub_value(item, secret)),
		serde_json::Value::Object(map) =>
			map.values_mut().for_each(|item| scrub_value(item, secret)),
		_ => {},
	}
}
