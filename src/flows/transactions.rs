//! Recent transactions lookup.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ItemId},
	client::{DateWindow, TransactionsPage, TransactionsRequest},
	flows::Bridge,
	obs::{FlowKind, FlowSpan},
};

/// Chooses which stored item a transactions lookup reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ItemSelector {
	/// The first item stored.
	#[default]
	Any,
	/// A specific item.
	Item(ItemId),
}

/// Result of a transactions lookup that did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum TransactionsOutcome {
	/// No stored item matched the selector; the aggregator was not called.
	NotConnected,
	/// Transactions were fetched for `item_id`.
	Fetched {
		/// Item the transactions belong to.
		item_id: ItemId,
		/// Window that was requested.
		window: DateWindow,
		/// Aggregator reply.
		page: TransactionsPage,
	},
}

impl Bridge {
	/// Fetches up to [`Bridge::TRANSACTION_PAGE_SIZE`] transactions from the trailing
	/// [`Bridge::TRANSACTION_WINDOW_DAYS`]-day window ending on `today`.
	pub async fn recent_transactions(
		&self,
		selector: ItemSelector,
		today: Date,
	) -> Result<TransactionsOutcome> {
		let span = FlowSpan::new(FlowKind::Transactions, "recent_transactions");

		span.observe(async move {
			let Some((item_id, access_token)) = self.select_item(selector).await? else {
				tracing::warn!("Transactions requested without a connected item.");

				return Ok(TransactionsOutcome::NotConnected);
			};
			let window = DateWindow::trailing(today, Self::TRANSACTION_WINDOW_DAYS);
			let request = TransactionsRequest {
				access_token,
				window,
				count: Self::TRANSACTION_PAGE_SIZE,
			};
			let page = self.api.get_transactions(&request).await.inspect_err(|e| {
				tracing::error!(%item_id, error = %e, "Fetching transactions failed.");
			})?;

			tracing::info!(
				%item_id,
				transaction_count = page.transactions.len(),
				total_transactions = page.total_transactions,
				"Fetched transactions."
			);

			Ok(TransactionsOutcome::Fetched { item_id, window, page })
		})
		.await
	}

	async fn select_item(&self, selector: ItemSelector) -> Result<Option<(ItemId, AccessToken)>> {
		let selected = match selector {
			ItemSelector::Any => self.store.get_any().await?,
			ItemSelector::Item(item_id) =>
				self.store.get(&item_id).await?.map(|token| (item_id, token)),
		};

		Ok(selected)
	}
}
