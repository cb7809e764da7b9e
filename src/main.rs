use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use weavetrace::log_sink::{SharedLogSink, TracingLogSink};
use weavetrace::scenario::{self, Variant};

/// Runs the letters pipeline with one of its error-handling variants.
#[derive(Debug, Parser)]
#[command(name = "weavetrace", version, about)]
struct Cli {
  /// How the failure of the run is handled and diagnosed.
  #[arg(long, value_enum, default_value_t = Variant::OperatorDebug)]
  variant: Variant,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  tracing_subscriber::fmt::init();

  let cli = Cli::parse();
  let sink: SharedLogSink = Arc::new(TracingLogSink::with_component("letters"));

  match scenario::run(cli.variant, sink).await {
    Ok(summary) => {
      info!(
        variant = %cli.variant,
        delivered = summary.delivered,
        "Done"
      );
      ExitCode::SUCCESS
    }
    Err(err) => {
      error!(variant = %cli.variant, error = %err, "Run failed");
      ExitCode::FAILURE
    }
  }
}
