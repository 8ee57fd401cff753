//! Public token exchange.

// self
use crate::{
	_prelude::*,
	auth::{ItemId, PublicToken},
	flows::Bridge,
	obs::{FlowKind, FlowSpan},
};

/// Reason returned when the request carries no usable public token.
pub const PUBLIC_TOKEN_REQUIRED: &str = "Public token is required.";

impl Bridge {
	/// Exchanges `public_token` and stores the resulting access token under its item.
	///
	/// A missing or empty token fails with [`Error::InvalidInput`] before any remote call.
	/// Exchanging for an item that is already stored replaces its token.
	pub async fn exchange_public_token(&self, public_token: Option<&str>) -> Result<ItemId> {
		let span = FlowSpan::new(FlowKind::PublicTokenExchange, "exchange_public_token");

		span.observe(async move {
			let public_token = match public_token {
				Some(value) if !value.is_empty() => PublicToken::new(value),
				_ => {
					tracing::warn!("Public token missing in exchange request.");

					return Err(Error::invalid_input(PUBLIC_TOKEN_REQUIRED));
				},
			};
			let exchanged = self.api.exchange_public_token(&public_token).await?;
			let item_id = exchanged.item_id;

			self.store.put(item_id.clone(), exchanged.access_token).await?;

			tracing::info!(%item_id, request_id = %exchanged.request_id, "Public token exchanged.");

			Ok(item_id)
		})
		.await
	}
}
