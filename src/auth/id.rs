//! Strongly typed identifiers enforced across the bridge domain.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use rand::Rng;
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;
const CLIENT_USER_ID_ENTROPY: usize = 24;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (item, client user).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (item, client user).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (item, client user).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { ItemId, "Aggregator handle for one connected financial institution login.", "Item" }
def_id! { ClientUserId, "Opaque per-link-attempt user identifier sent to Link.", "ClientUser" }

impl ClientUserId {
	/// Generates a fresh identifier from 24 bytes of CSPRNG output, hex-encoded.
	///
	/// The value is not a stable user identity; every Link attempt gets a new one.
	pub fn generate() -> Self {
		let mut bytes = [0_u8; CLIENT_USER_ID_ENTROPY];

		rand::rng().fill(&mut bytes);

		Self(hex::encode(bytes))
	}
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_empty() {
		assert!(ItemId::new(" item-123").is_err(), "Leading whitespace must be rejected.");
		assert!(ItemId::new("item-123 ").is_err(), "Trailing whitespace must be rejected.");
		assert!(matches!(ItemId::new(""), Err(IdentifierError::Empty { kind: "Item" })));

		let item = ItemId::new("item-123").expect("Item fixture should be considered valid.");

		assert_eq!(item.as_ref(), "item-123");
		assert_eq!(format!("{item:?}"), "Item(item-123)");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let item: ItemId =
			serde_json::from_str("\"item-42\"").expect("Item should deserialize successfully.");

		assert_eq!(item.as_ref(), "item-42");
		assert!(serde_json::from_str::<ItemId>("\"with space\"").is_err());
		assert!(serde_json::from_str::<ItemId>("\"\"").is_err());
	}

	#[test]
	fn length_limit_applies() {
		ItemId::new("a".repeat(IDENTIFIER_MAX_LEN)).expect("Exact length should succeed.");

		assert!(ItemId::new("a".repeat(IDENTIFIER_MAX_LEN + 1)).is_err());
	}

	#[test]
	fn generated_client_user_ids_are_fresh_hex() {
		let first = ClientUserId::generate();
		let second = ClientUserId::generate();

		assert_eq!(first.len(), CLIENT_USER_ID_ENTROPY * 2);
		assert!(first.chars().all(|ch| ch.is_ascii_hexdigit()));
		assert_ne!(first, second);
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<ItemId, u8> = HashMap::from_iter([(
			ItemId::new("item-123").expect("Item used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("item-123"), Some(&7));
	}
}
