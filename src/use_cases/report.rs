use derive_more::derive::Display;

use crate::domain::error::GatewayError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	#[display("Payment")]
	Payment,
	#[display("Partial refund")]
	PartialRefund,
	#[display("Store card")]
	StoreCard,
	#[display("Stored card charge")]
	StoredCardCharge,
	#[display("List stored cards")]
	ListStoredCards,
	#[display("Delete stored card")]
	DeleteStoredCard,
	#[display("Reconciliation summary")]
	ReconciliationSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
	/// The gateway answered with the success code.
	Succeeded(String),
	/// The gateway answered, but with a non-success code.
	Rejected { code: String, message: String },
	/// The call itself failed.
	Failed(GatewayError),
	/// A step this one depends on did not produce what it needs.
	Skipped(String),
}

impl StepOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self, StepOutcome::Succeeded(_))
	}

	pub fn is_skipped(&self) -> bool {
		matches!(self, StepOutcome::Skipped(_))
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
	pub step:    Step,
	pub outcome: StepOutcome,
	pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmokeReport {
	pub steps: Vec<StepReport>,
}

impl SmokeReport {
	pub fn record(&mut self, step: Step, outcome: StepOutcome) {
		self.record_with_details(step, outcome, Vec::new());
	}

	pub fn record_with_details(
		&mut self,
		step: Step,
		outcome: StepOutcome,
		details: Vec<String>,
	) {
		self.steps.push(StepReport {
			step,
			outcome,
			details,
		});
	}

	pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
		self.steps
			.iter()
			.find(|report| report.step == step)
			.map(|report| &report.outcome)
	}

	pub fn failures(&self) -> usize {
		self.steps
			.iter()
			.filter(|report| {
				matches!(
					report.outcome,
					StepOutcome::Failed(_) | StepOutcome::Rejected { .. }
				)
			})
			.count()
	}
}
