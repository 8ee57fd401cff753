// crates.io
use tracing::{Instrument, Span, instrument::Instrumented};
// self
use crate::{
	_prelude::*,
	obs::{FlowKind, FlowOutcome, record_flow_outcome},
};

/// Span wrapper shared by bridge flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	kind: FlowKind,
	span: Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		let span = tracing::info_span!("plaid_bridge.flow", flow = kind.as_str(), stage);

		Self { kind, span }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}

	/// Runs `fut` inside the span, recording attempt and outcome counters around it.
	pub async fn observe<Fut, T>(&self, fut: Fut) -> Result<T>
	where
		Fut: Future<Output = Result<T>>,
	{
		record_flow_outcome(self.kind, FlowOutcome::Attempt);

		let result = self.instrument(fut).await;
		let outcome = if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure };

		record_flow_outcome(self.kind, outcome);

		result
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowKind::LinkToken, "instrument_wraps_future");
		let value = FlowSpan::instrument(&span, async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[tokio::test]
	async fn observe_passes_results_through() {
		let span = FlowSpan::new(FlowKind::Transactions, "observe_passes_results_through");
		let ok =
			span.observe(async { Ok(7) }).await.expect("Successful flows should pass through.");
		let err = span
			.observe(async { Err::<u8, _>(Error::invalid_input("boom")) })
			.await
			.expect_err("Failed flows should pass through.");

		assert_eq!(ok, 7);
		assert_eq!(err.to_string(), "boom");
	}
}
