//! Observability for the link, exchange, and transactions flows.
//!
//! Every [`Bridge`](crate::flows::Bridge) operation runs inside a [`FlowSpan`]. Flow and
//! aggregator client events therefore nest under a `plaid_bridge.flow` span carrying `flow` and
//! `stage` fields, which itself sits inside the `tower-http` request span.
//!
//! With the `metrics` feature, `plaid_bridge_flow_total{flow, outcome}` counts how often each
//! operation was attempted and how it ended. A failed exchange, for example, records
//! `flow="public_token_exchange"` twice: once as `attempt` and once as `failure`.
//!
//! [`logging`] installs the process-wide subscriber used by the binary.

pub mod logging;

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations the bridge exposes over HTTP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// `POST /create_link_token`.
	LinkToken,
	/// `POST /exchange_public_token`.
	PublicTokenExchange,
	/// `GET /transactions`; a lookup that finds no stored item still counts as a success.
	Transactions,
}
impl FlowKind {
	/// Label used for the `flow` span field and metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::LinkToken => "link_token",
			FlowKind::PublicTokenExchange => "public_token_exchange",
			FlowKind::Transactions => "transactions",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Points in a flow at which the counter is bumped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// The flow started.
	Attempt,
	/// The flow returned `Ok`.
	Success,
	/// The flow returned an invalid-input, remote, or unexpected error.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
