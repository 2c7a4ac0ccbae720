use clap::Parser;

use label_propagator_cli::{
    commands::propagate_cmd::{self, PropagateArgs},
    reporting::error_annotation,
};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// Environment variable holding the log filter, e.g. `debug` or `github_client=trace`
const LOG_FILTER_ENV: &str = "LABEL_PROPAGATOR_LOG";

/// Label propagator: copy the labels of the linked issue onto a pull request
#[derive(Parser)]
#[command(name = "label-propagator")]
#[command(version)]
#[command(
    about = "Copy the labels of the issue a pull request closes onto the pull request",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    args: PropagateArgs,
}

#[tokio::main]
async fn main() {
    // Initialize logging; stdout is reserved for workflow commands
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match propagate_cmd::execute(&cli.args).await {
        Ok(outcome) => {
            println!("{outcome}");
            std::process::exit(0);
        }
        Err(e) => {
            error!("Error: {e}");
            println!("{}", error_annotation(&e));
            std::process::exit(1);
        }
    }
}
