//! uxrgen CLI: Micro XRCE-DDS type support from installed ROS 2 interfaces.

use clap::Parser;
use uxrgen::cli::Cli;
use uxrgen::report::{logging, Reporter, TracingReporter};
use uxrgen::transport::LocalRunner;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let log = TracingReporter;
    if let Err(e) = uxrgen::cli::dispatch(&cli, &LocalRunner, &log) {
        log.error(&e.to_string());
        std::process::exit(1);
    }
}
