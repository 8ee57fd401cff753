// self
use crate::obs::{FlowKind, FlowOutcome};

/// Bumps `plaid_bridge_flow_total` for `kind` and `outcome`.
///
/// Without the `metrics` feature this is a no-op; with it, the counter goes to whichever
/// recorder the embedding process installed, and is dropped when none is installed.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"plaid_bridge_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
