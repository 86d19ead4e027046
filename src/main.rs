mod cli;
mod error;
mod hardware;
mod output;
mod render;
#[cfg(test)]
mod testing;

use clap::Parser;
use cli::Cli;
use hardware::gather_system_info;
use output::{output_data, print_error};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_filter()))
        .with_writer(std::io::stderr)
        .init();

    let snapshot = gather_system_info();

    if let Err(e) = output_data(&snapshot, cli.format) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
