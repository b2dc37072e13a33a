use crate::use_cases::report::{SmokeReport, StepOutcome, StepReport};

pub fn render_outcome(outcome: &StepOutcome) -> String {
	match outcome {
		StepOutcome::Succeeded(detail) => format!("OK       {detail}"),
		StepOutcome::Rejected { code, message } => {
			format!("REJECTED Sonuc={code} {message}")
		}
		StepOutcome::Failed(err) => format!("FAILED   [{}] {err}", err.name()),
		StepOutcome::Skipped(reason) => format!("SKIPPED  {reason}"),
	}
}

pub fn render_step(report: &StepReport) -> Vec<String> {
	let mut lines = vec![format!(
		"{:<24} {}",
		report.step.to_string(),
		render_outcome(&report.outcome)
	)];
	lines.extend(report.details.iter().map(|detail| format!("    {detail}")));
	lines
}

pub fn render(report: &SmokeReport) -> Vec<String> {
	report.steps.iter().flat_map(render_step).collect()
}

pub fn print(report: &SmokeReport) {
	for line in render(report) {
		println!("{line}");
	}
}
