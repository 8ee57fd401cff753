//! Redacting wrappers for credentials that must stay out of logs and responses.

// self
use crate::_prelude::*;

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}

			/// Whether the wrapped value is empty.
			pub fn is_empty(&self) -> bool {
				self.0.is_empty()
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! { AccessToken, "Durable credential scoped to one item." }
def_secret! { PublicToken, "Short-lived token returned by Link, exchanged server-side." }
def_secret! { ClientSecret, "Aggregator API secret paired with the client identifier." }

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let token = AccessToken::new("access-sandbox-123");

		assert_eq!(format!("{token:?}"), "AccessToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
		assert_eq!(token.expose(), "access-sandbox-123");
	}

	#[test]
	fn secrets_deserialize_transparently() {
		let secret: ClientSecret =
			serde_json::from_str("\"shh\"").expect("Secret should deserialize from a string.");

		assert_eq!(secret.expose(), "shh");
		assert!(!secret.is_empty());
		assert!(PublicToken::new("").is_empty());
	}
}
