//! Thread-safe in-memory [`TokenStore`] implementation.
//!
//! Entries live for the life of the process. `get_any` returns the earliest inserted item;
//! replacing an item's token keeps its position.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ItemId},
	store::{StoreFuture, TokenStore},
};

type StoreState = Arc<Mutex<Entries>>;

#[derive(Debug, Default)]
struct Entries {
	order: Vec<ItemId>,
	tokens: HashMap<ItemId, AccessToken>,
}

/// Process-local token store shared by every request handler.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreState);
impl MemoryStore {
	/// Number of stored items.
	pub fn len(&self) -> usize {
		self.0.lock().order.len()
	}

	/// Whether the store holds no items.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn put_now(state: &StoreState, item_id: ItemId, access_token: AccessToken) {
		let mut guard = state.lock();

		if guard.tokens.insert(item_id.clone(), access_token).is_none() {
			guard.order.push(item_id);
		}
	}

	fn first_now(state: &StoreState) -> Option<(ItemId, AccessToken)> {
		let guard = state.lock();
		let item_id = guard.order.first()?;

		guard.tokens.get(item_id).map(|token| (item_id.clone(), token.clone()))
	}
}
impl TokenStore for MemoryStore {
	fn put(&self, item_id: ItemId, access_token: AccessToken) -> StoreFuture<'_, ()> {
		Self::put_now(&self.0, item_id, access_token);

		Box::pin(async { Ok(()) })
	}

	fn get<'a>(&'a self, item_id: &'a ItemId) -> StoreFuture<'a, Option<AccessToken>> {
		let found = self.0.lock().tokens.get(item_id).cloned();

		Box::pin(async move { Ok(found) })
	}

	fn get_any(&self) -> StoreFuture<'_, Option<(ItemId, AccessToken)>> {
		let found = Self::first_now(&self.0);

		Box::pin(async move { Ok(found) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn item(value: &str) -> ItemId {
		ItemId::new(value).expect("Item fixture should be valid.")
	}

	#[tokio::test]
	async fn replacing_a_token_keeps_insertion_order() {
		let store = MemoryStore::default();

		let writes = [("item-a", "access-a1"), ("item-b", "access-b"), ("item-a", "access-a2")];

		for (item_id, token) in writes {
			store.put(item(item_id), AccessToken::new(token)).await.expect("Put should succeed.");
		}

		assert_eq!(store.len(), 2);

		let (item_id, token) = store
			.get_any()
			.await
			.expect("Get should succeed.")
			.expect("Store should be non-empty.");

		assert_eq!(item_id.as_ref(), "item-a");
		assert_eq!(token.expose(), "access-a2");
	}
}
