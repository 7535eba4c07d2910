//! Function Latency Tester - Main CLI Application
//!
//! Benchmarks the invocation latency of a deployed function by driving a
//! fixed number of calls through a pool of concurrent workers.

use clap::Parser;
use function_latency_tester::{
    app::run_application,
    cli::Cli,
    error::ErrorReporter,
};
use std::process;

fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        eprintln!("Please report this issue at: https://github.com/MaurUppi/function-latency-tester/issues");
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();
    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose || cli.debug);

    if let Err(e) = run_application(cli) {
        reporter.report_error(&e);
        process::exit(e.exit_code());
    }
}
