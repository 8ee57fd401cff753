//! HTML views rendered from the bundled templates.

// std
use std::fmt::Write as _;
// crates.io
use html_escape::encode_text;
// self
use crate::client::{DateWindow, TransactionsPage, format_date};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const TRANSACTIONS_TEMPLATE: &str = include_str!("../../templates/transactions.html");

/// Shown when no stored item matches the request.
pub const NOT_CONNECTED_MESSAGE: &str =
	"No bank account connected. Please connect an account via Plaid Link first.";
/// Shown when the aggregator rejects the transactions request.
pub const REMOTE_FAILURE_MESSAGE: &str = "Could not fetch transactions. The connection with your bank may have issues or your session may have expired. Please try re-connecting.";
/// Shown for any other transactions failure.
pub const UNEXPECTED_FAILURE_MESSAGE: &str =
	"An unexpected server error occurred while fetching transactions.";
/// Added when the aggregator reports the item needs a fresh login.
pub const RELINK_MESSAGE: &str =
	"Your bank needs you to sign in again. Reconnect the account through Plaid Link.";

/// States the transactions page can render.
#[derive(Clone, Debug)]
pub enum TransactionsView<'a> {
	/// No stored item matched.
	NotConnected,
	/// Transactions were fetched.
	Fetched {
		/// Requested window.
		window: DateWindow,
		/// Aggregator reply.
		page: &'a TransactionsPage,
	},
	/// The aggregator returned a structured failure.
	RemoteFailure {
		/// Pretty-printed error body with credentials already removed.
		details: String,
		/// Whether the user must re-link the item.
		requires_relink: bool,
	},
	/// Any other failure.
	Unexpected,
}

/// Renders the landing page.
pub fn render_index() -> &'static str {
	INDEX_TEMPLATE
}

/// Renders the transactions page for `view`.
pub fn render_transactions(view: &TransactionsView) -> String {
	let content = match view {
		TransactionsView::NotConnected => error_block(NOT_CONNECTED_MESSAGE),
		TransactionsView::Fetched { window, page } => transactions_block(window, page),
		TransactionsView::RemoteFailure { details, requires_relink } => {
			let mut html = error_block(REMOTE_FAILURE_MESSAGE);

			if *requires_relink {
				html.push_str(&error_block(RELINK_MESSAGE));
			}

			let _ = writeln!(
				html,
				"\t<details>\n\t\t<summary>Error details</summary>\n\t\t<pre>{}</pre>\n\t</details>",
				encode_text(details)
			);

			html
		},
		TransactionsView::Unexpected => error_block(UNEXPECTED_FAILURE_MESSAGE),
	};

	TRANSACTIONS_TEMPLATE.replace("{{CONTENT}}", &content)
}

fn error_block(message: &str) -> String {
	format!("\t<p class=\"error\">{}</p>\n", encode_text(message))
}

fn transactions_block(window: &DateWindow, page: &TransactionsPage) -> String {
	let mut html = format!(
		"\t<p>Transactions from {} to {}.</p>\n",
		format_date(window.start),
		format_date(window.end)
	);

	if page.transactions.is_empty() {
		html.push_str("\t<p>No transactions in this period.</p>\n");

		return html;
	}

	let shown = page.transactions.len();
	let total = usize::try_from(page.total_transactions).unwrap_or(usize::MAX);

	if total > shown {
		let _ = writeln!(html, "\t<p>Showing {shown} of {total} transactions.</p>");
	}

	html.push_str(
		"\t<table>\n\t\t<thead><tr><th>Date</th><th>Description</th><th>Account</th><th>Amount</th></tr></thead>\n\t\t<tbody>\n",
	);

	for transaction in &page.transactions {
		let account = page
			.account(&transaction.account_id)
			.map(|account| account.name.as_str())
			.unwrap_or(transaction.account_id.as_str());
		let currency = transaction.iso_currency_code.as_deref().unwrap_or_default();
		let (row_class, pending) =
			if transaction.pending { (" class=\"pending\"", " (pending)") } else { ("", "") };
		let _ = writeln!(
			html,
			"\t\t\t<tr{row_class}><td>{}</td><td>{}{pending}</td><td>{}</td><td class=\"amount\">{:.2} {}</td></tr>",
			encode_text(&transaction.date),
			encode_text(transaction.label()),
			encode_text(account),
			transaction.amount,
			encode_text(currency),
		);
	}

	html.push_str("\t\t</tbody>\n\t</table>\n");

	html
}
