//! Link token creation.

// self
use crate::{
	_prelude::*,
	auth::ClientUserId,
	client::{LinkToken, LinkTokenRequest},
	flows::Bridge,
	obs::{FlowKind, FlowSpan},
};

impl Bridge {
	/// Mints a link token for a freshly generated client user identifier.
	///
	/// Every call generates a new identifier; nothing is stored.
	pub async fn create_link_token(&self) -> Result<LinkToken> {
		let span = FlowSpan::new(FlowKind::LinkToken, "create_link_token");

		span.observe(async move {
			let request = LinkTokenRequest {
				user: ClientUserId::generate(),
				client_name: self.settings.client_name.clone(),
				products: self.settings.products.clone(),
				country_codes: self.settings.country_codes.clone(),
				language: self.settings.language.clone(),
			};
			let token = self.api.create_link_token(&request).await?;

			tracing::info!(request_id = %token.request_id, "Link token created.");

			Ok(token)
		})
		.await
	}
}
