//! Route handlers; every request-time error is converted into a response here.

// crates.io
use axum::{
	Json,
	body::Bytes,
	extract::{Query, State, rejection::QueryRejection},
	http::StatusCode,
	response::{Html, IntoResponse, Response},
};
use serde_json::{Value, json};
// self
use crate::{
	_prelude::*,
	auth::ItemId,
	error::RemoteError,
	flows::{Bridge, ItemSelector, TransactionsOutcome},
	server::views::{self, TransactionsView},
};

/// Message returned when link-token creation is rejected by the aggregator.
pub const LINK_TOKEN_FAILURE: &str = "Could not initialize Plaid Link. Please try again later.";
/// Message returned when the exchange is rejected by the aggregator.
pub const EXCHANGE_FAILURE: &str = "Could not connect your account. Please try again.";
/// Message returned for unexpected failures on JSON routes.
pub const UNEXPECTED_FAILURE: &str = "An unexpected server error occurred.";
/// Message returned after a successful exchange.
pub const EXCHANGE_SUCCESS: &str = "Public token exchanged successfully. Account connected.";

/// Query parameters accepted by `GET /transactions`.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
	/// Explicit item to read; the first stored item is used when absent.
	pub item_id: Option<String>,
}

/// `POST /create_link_token`.
pub async fn create_link_token(State(bridge): State<Arc<Bridge>>) -> Response {
	match bridge.create_link_token().await {
		Ok(token) => Json(token).into_response(),
		Err(e) => json_error(e, "link token creation", LINK_TOKEN_FAILURE),
	}
}

/// `POST /exchange_public_token`.
///
/// The body is parsed leniently so a missing body, malformed JSON, or a non-string
/// `public_token` all surface as the same validation failure.
pub async fn exchange_public_token(State(bridge): State<Arc<Bridge>>, body: Bytes) -> Response {
	let payload = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
	let public_token = payload.get("public_token").and_then(Value::as_str);

	match bridge.exchange_public_token(public_token).await {
		Ok(_) => Json(json!({ "message": EXCHANGE_SUCCESS })).into_response(),
		Err(e) => json_error(e, "public token exchange", EXCHANGE_FAILURE),
	}
}

/// `GET /transactions`.
///
/// Always answers with a rendered page; a query string that cannot be read is treated like an
/// unknown item.
pub async fn transactions(
	State(bridge): State<Arc<Bridge>>,
	query: Result<Query<TransactionsQuery>, QueryRejection>,
) -> Html<String> {
	let query = match query {
		Ok(Query(query)) => query,
		Err(e) => {
			tracing::warn!(error = %e, "Rejected malformed transactions query.");

			return Html(views::render_transactions(&TransactionsView::NotConnected));
		},
	};
	let selector = match query.item_id.as_deref().filter(|value| !value.is_empty()) {
		None => ItemSelector::Any,
		Some(raw) => match ItemId::new(raw) {
			Ok(item_id) => ItemSelector::Item(item_id),
			Err(e) => {
				tracing::warn!(error = %e, "Rejected malformed item_id selector.");

				return Html(views::render_transactions(&TransactionsView::NotConnected));
			},
		},
	};
	let today = bridge.today();
	let html = match bridge.recent_transactions(selector, today).await {
		Ok(TransactionsOutcome::NotConnected) =>
			views::render_transactions(&TransactionsView::NotConnected),
		Ok(TransactionsOutcome::Fetched { window, page, .. }) =>
			views::render_transactions(&TransactionsView::Fetched { window, page: &page }),
		Err(Error::Remote(remote)) => views::render_transactions(&TransactionsView::RemoteFailure {
			details: pretty_body(&remote),
			requires_relink: remote.requires_relink(),
		}),
		Err(_) => views::render_transactions(&TransactionsView::Unexpected),
	};

	Html(html)
}

/// `GET /`.
pub async fn index() -> Html<&'static str> {
	Html(views::render_index())
}

/// Shapes a flow error into the JSON error envelope used by the POST routes.
pub fn json_error(error: Error, operation: &'static str, remote_message: &str) -> Response {
	match error {
		Error::InvalidInput { reason } =>
			(StatusCode::BAD_REQUEST, Json(json!({ "error": reason }))).into_response(),
		Error::Remote(remote) => {
			log_remote(&remote, operation);

			(
				StatusCode::INTERNAL_SERVER_ERROR,
				Json(json!({ "error": remote_message, "details": remote.body })),
			)
				.into_response()
		},
		Error::Unexpected(e) => {
			tracing::error!(operation, error = ?e, "Unexpected error.");

			(StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": UNEXPECTED_FAILURE })))
				.into_response()
		},
	}
}

fn log_remote(remote: &RemoteError, operation: &'static str) {
	tracing::error!(
		operation,
		status = remote.status,
		error_type = %remote.error_type,
		error_code = %remote.error_code,
		request_id = remote.request_id.as_deref().unwrap_or_default(),
		message = %remote.error_message,
		"Plaid API error."
	);
}

fn pretty_body(remote: &RemoteError) -> String {
	serde_json::to_string_pretty(&remote.body).unwrap_or_else(|_| remote.body.to_string())
}
