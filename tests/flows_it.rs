// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use parking_lot::Mutex;
use time::macros::date;
// self
use plaid_bridge::{
	auth::{AccessToken, ItemId, PublicToken},
	client::{
		AggregatorApi, ApiFuture, ExchangedItem, LinkToken, LinkTokenRequest, TransactionsPage,
		TransactionsRequest,
	},
	error::{Error, ErrorKind, RemoteError},
	flows::{Bridge, ItemSelector, TransactionsOutcome},
	provider::LinkSettings,
	store::{MemoryStore, TokenStore},
};

#[derive(Default)]
struct FakeApi {
	link_calls: AtomicUsize,
	exchange_calls: AtomicUsize,
	link_requests: Mutex<Vec<LinkTokenRequest>>,
	transactions_requests: Mutex<Vec<TransactionsRequest>>,
}
impl FakeApi {
	fn transactions_calls(&self) -> usize {
		self.transactions_requests.lock().len()
	}
}
impl AggregatorApi for FakeApi {
	fn create_link_token<'a>(&'a self, request: &'a LinkTokenRequest) -> ApiFuture<'a, LinkToken> {
		self.link_calls.fetch_add(1, Ordering::SeqCst);
		self.link_requests.lock().push(request.clone());

		Box::pin(async {
			Ok(LinkToken {
				link_token: "link-sandbox-1".into(),
				expiration: "2024-03-15T12:00:00Z".into(),
				request_id: "req-link".into(),
			})
		})
	}

	fn exchange_public_token<'a>(
		&'a self,
		public_token: &'a PublicToken,
	) -> ApiFuture<'a, ExchangedItem> {
		self.exchange_calls.fetch_add(1, Ordering::SeqCst);

		let reply = match public_token.expose() {
			"public-sandbox-abc" => Ok(exchanged("item-123", "access-xyz")),
			"public-sandbox-def" => Ok(exchanged("item-456", "access-uvw")),
			_ => Err(Error::Remote(RemoteError {
				status: 400,
				error_type: "INVALID_INPUT".into(),
				error_code: "INVALID_PUBLIC_TOKEN".into(),
				error_message: "provided public token is in an invalid format".into(),
				display_message: None,
				request_id: Some("req-bad".into()),
				body: serde_json::json!({ "error_code": "INVALID_PUBLIC_TOKEN" }),
			})),
		};

		Box::pin(async move { reply })
	}

	fn get_transactions<'a>(
		&'a self,
		request: &'a TransactionsRequest,
	) -> ApiFuture<'a, TransactionsPage> {
		self.transactions_requests.lock().push(request.clone());

		Box::pin(async {
			Ok(TransactionsPage { request_id: "req-tx".into(), ..Default::default() })
		})
	}
}

fn exchanged(item_id: &str, access_token: &str) -> ExchangedItem {
	ExchangedItem {
		access_token: AccessToken::new(access_token),
		item_id: ItemId::new(item_id).expect("Item identifier fixture should be valid."),
		request_id: "req-exchange".into(),
	}
}

fn bridge() -> (Bridge, Arc<FakeApi>, Arc<MemoryStore>) {
	let api = Arc::new(FakeApi::default());
	let store = Arc::new(MemoryStore::default());
	let bridge = Bridge::new(api.clone(), store.clone(), LinkSettings::default());

	(bridge, api, store)
}

#[tokio::test]
async fn link_tokens_use_fresh_user_ids_and_configured_settings() {
	let (bridge, api, store) = bridge();
	let first = bridge.create_link_token().await.expect("Link token creation should succeed.");

	bridge.create_link_token().await.expect("Second link token creation should succeed.");

	assert_eq!(first.link_token, "link-sandbox-1");
	assert_eq!(api.link_calls.load(Ordering::SeqCst), 2);
	assert!(store.is_empty());

	let requests = api.link_requests.lock();

	assert_ne!(requests[0].user, requests[1].user);
	assert_eq!(requests[0].client_name, "My Plaid App");
	assert_eq!(requests[0].products, LinkSettings::default().products);
	assert_eq!(requests[0].language, "en");
}

#[tokio::test]
async fn missing_public_token_fails_before_any_remote_call() {
	let (bridge, api, store) = bridge();

	for input in [None, Some("")] {
		let err = bridge
			.exchange_public_token(input)
			.await
			.expect_err("Missing public tokens should be rejected.");

		assert_eq!(err.kind(), ErrorKind::InvalidInput);
		assert_eq!(err.to_string(), "Public token is required.");
	}

	assert_eq!(api.exchange_calls.load(Ordering::SeqCst), 0);
	assert!(store.is_empty());
}

#[tokio::test]
async fn exchanges_store_one_entry_per_item() {
	let (bridge, _api, store) = bridge();
	let item_id = bridge
		.exchange_public_token(Some("public-sandbox-abc"))
		.await
		.expect("Exchange should succeed.");

	assert_eq!(item_id.as_ref(), "item-123");
	assert_eq!(store.len(), 1);

	let token = store
		.get(&item_id)
		.await
		.expect("Lookup should succeed.")
		.expect("Exchanged item should be stored.");

	assert_eq!(token.expose(), "access-xyz");

	bridge
		.exchange_public_token(Some("public-sandbox-def"))
		.await
		.expect("Second exchange should succeed.");

	assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn failed_exchanges_leave_the_store_untouched() {
	let (bridge, api, store) = bridge();
	let err = bridge
		.exchange_public_token(Some("public-garbage"))
		.await
		.expect_err("Invalid public tokens should fail.");

	assert!(matches!(err, Error::Remote(_)));
	assert_eq!(api.exchange_calls.load(Ordering::SeqCst), 1);
	assert!(store.is_empty());
}

#[tokio::test]
async fn transactions_without_connection_skip_the_remote_call() {
	let (bridge, api, _store) = bridge();
	let outcome = bridge
		.recent_transactions(ItemSelector::Any, date!(2024 - 03 - 15))
		.await
		.expect("Lookup on an empty store should not fail.");

	assert_eq!(outcome, TransactionsOutcome::NotConnected);
	assert_eq!(api.transactions_calls(), 0);
}

#[tokio::test]
async fn exchanged_token_is_used_for_transactions() {
	let (bridge, api, _store) = bridge();

	bridge
		.exchange_public_token(Some("public-sandbox-abc"))
		.await
		.expect("Exchange should succeed.");

	let outcome = bridge
		.recent_transactions(ItemSelector::Any, date!(2024 - 03 - 15))
		.await
		.expect("Lookup should succeed.");

	match outcome {
		TransactionsOutcome::Fetched { item_id, window, page } => {
			assert_eq!(item_id.as_ref(), "item-123");
			assert_eq!(window.start, date!(2024 - 02 - 14));
			assert_eq!(window.end, date!(2024 - 03 - 15));
			assert_eq!(page.request_id, "req-tx");
		},
		other => panic!("Expected fetched transactions, got {other:?}."),
	}

	let requests = api.transactions_requests.lock();

	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].access_token.expose(), "access-xyz");
	assert_eq!(requests[0].count, 100);
}

#[tokio::test]
async fn window_always_spans_thirty_days_ending_today() {
	let (bridge, api, _store) = bridge();

	bridge
		.exchange_public_token(Some("public-sandbox-abc"))
		.await
		.expect("Exchange should succeed.");

	let days =
		[date!(2024 - 03 - 01), date!(2024 - 01 - 15), date!(2023 - 12 - 31), date!(2025 - 07 - 04)];

	for today in days {
		bridge.recent_transactions(ItemSelector::Any, today).await.expect("Lookup should succeed.");
	}

	for request in api.transactions_requests.lock().iter() {
		assert_eq!(request.window.span_days(), 30);
	}

	let requests = api.transactions_requests.lock();

	assert_eq!(requests[0].window.start, date!(2024 - 01 - 31));
	assert_eq!(requests[1].window.start, date!(2023 - 12 - 16));
	assert_eq!(requests[2].window.end, date!(2023 - 12 - 31));
}

#[tokio::test]
async fn explicit_selector_reads_the_named_item() {
	let (bridge, api, _store) = bridge();

	for public_token in ["public-sandbox-abc", "public-sandbox-def"] {
		bridge.exchange_public_token(Some(public_token)).await.expect("Exchange should succeed.");
	}

	let selector =
		ItemSelector::Item(ItemId::new("item-456").expect("Item identifier should be valid."));
	let outcome = bridge
		.recent_transactions(selector, date!(2024 - 03 - 15))
		.await
		.expect("Lookup should succeed.");

	assert!(matches!(
		outcome,
		TransactionsOutcome::Fetched { ref item_id, .. } if item_id.as_ref() == "item-456"
	));
	assert_eq!(api.transactions_requests.lock()[0].access_token.expose(), "access-uvw");

	let selector =
		ItemSelector::Item(ItemId::new("item-999").expect("Item identifier should be valid."));
	let outcome = bridge
		.recent_transactions(selector, date!(2024 - 03 - 15))
		.await
		.expect("Lookup should succeed.");

	assert_eq!(outcome, TransactionsOutcome::NotConnected);
	assert_eq!(api.transactions_calls(), 1);
}
