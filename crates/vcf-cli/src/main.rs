//! VCF Tonnage - volume-corrected oil tonnage from a VCF reference table
//!
//! A CLI tool that imports VCF reference data and computes tonnage for
//! measured volume, density and temperature.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

const WORKSPACE_CRATES: [&str; 4] = ["vcf_domain", "vcf_store", "vcf_infra", "vcf_app"];

/// Log to stderr; RUST_LOG wins over --verbose
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = vec!["warn".to_string()];
        if verbose {
            directives.extend(WORKSPACE_CRATES.iter().map(|krate| format!("{}=debug", krate)));
        }
        EnvFilter::new(directives.join(","))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
