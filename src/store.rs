//! Storage contracts and the built-in store for item access tokens.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ItemId},
};

/// Boxed future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Mapping from item identifiers to their access tokens.
///
/// Implementations must tolerate concurrent use from every request handler. Writes to an
/// existing item replace its token.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Stores (or replaces) the access token for `item_id`.
	fn put(&self, item_id: ItemId, access_token: AccessToken) -> StoreFuture<'_, ()>;

	/// Returns the token stored for `item_id`, if any.
	fn get<'a>(&'a self, item_id: &'a ItemId) -> StoreFuture<'a, Option<AccessToken>>;

	/// Returns one stored entry, or `None` when the store is empty.
	///
	/// Selection is deterministic for a given store state.
	fn get_any(&self) -> StoreFuture<'_, Option<(ItemId, AccessToken)>>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::UnexpectedError;

	#[test]
	fn store_error_converts_into_unexpected_error_with_source() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let error: Error = store_error.clone().into();

		assert!(matches!(error, Error::Unexpected(UnexpectedError::Storage(_))));
		assert!(error.to_string().contains("database unreachable"));
	}
}
