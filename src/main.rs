use std::process::ExitCode;
use std::sync::Arc;

use turkpos_smoke::run;

#[tokio::main]
async fn main() -> ExitCode {
	let config = Arc::new(
		turkpos_smoke::config::Config::load()
			.expect("Failed to load configuration"),
	);

	match run(config).await {
		Ok(_) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("Smoke run aborted: {e}");
			ExitCode::FAILURE
		}
	}
}
