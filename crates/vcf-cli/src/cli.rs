//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vcf_types::OutputFormat;

#[derive(Parser)]
#[command(name = "vcf-tonnage")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Volume-corrected oil tonnage from a VCF reference table")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Directory holding the reference table and history (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Debug logging for lookups and imports
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate tonnage and record it in the history
    Calculate {
        /// Volume in litres
        #[arg(long, allow_negative_numbers = true)]
        volume: f64,

        /// Density in kg/m³
        #[arg(long, allow_negative_numbers = true)]
        density: f64,

        /// Temperature in °C
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,

        /// Do not record the calculation
        #[arg(long)]
        no_save: bool,
    },

    /// Import reference data from a SQL dump or CSV file
    Import {
        /// Path to .sql dump or .csv file
        file: PathBuf,

        /// Remove all existing entries first
        #[arg(long)]
        clear: bool,
    },

    /// Show how a VCF is resolved for a density and temperature
    Lookup {
        /// Density in kg/m³
        #[arg(long, allow_negative_numbers = true)]
        density: f64,

        /// Temperature in °C
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
    },

    /// Search and list calculation history
    History {
        /// Substring of volume, density, temperature or tonnage
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Sort key: volume, density, temperature, vcf, tonnage, created_at
        /// (prefix with - for descending)
        #[arg(long, allow_hyphen_values = true)]
        sort: Option<String>,

        /// Page number (starting at 1)
        #[arg(long, short = 'p')]
        page: Option<usize>,
    },

    /// Show the most recent calculations
    Recent,

    /// List reference table entries
    Table {
        /// Page number (starting at 1)
        #[arg(long, short = 'p')]
        page: Option<usize>,
    },

    /// Show or modify configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Reset to default configuration
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calculate_with_negative_temperature() {
        let cli = Cli::parse_from([
            "vcf-tonnage",
            "calculate",
            "--volume",
            "1000",
            "--density",
            "850",
            "--temperature",
            "-12.5",
            "--format",
            "json",
        ]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Calculate {
                volume,
                temperature,
                no_save,
                ..
            } => {
                assert_eq!(volume, 1000.0);
                assert_eq!(temperature, -12.5);
                assert!(!no_save);
            }
            _ => panic!("expected calculate"),
        }
    }

    #[test]
    fn test_parse_negative_volume_and_density() {
        let cli = Cli::try_parse_from([
            "vcf-tonnage",
            "calculate",
            "--volume",
            "-5",
            "--density",
            "-850",
            "--temperature",
            "20",
        ])
        .unwrap();
        match cli.command {
            Commands::Calculate {
                volume,
                density,
                ..
            } => {
                assert_eq!(volume, -5.0);
                assert_eq!(density, -850.0);
            }
            _ => panic!("expected calculate"),
        }

        let cli = Cli::try_parse_from([
            "vcf-tonnage",
            "lookup",
            "--density",
            "-1",
            "--temperature",
            "-10",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Lookup { density, .. } if density == -1.0));
    }

    #[test]
    fn test_parse_history_descending_sort() {
        let cli = Cli::parse_from(["vcf-tonnage", "history", "--sort", "-tonnage", "-p", "2"]);
        match cli.command {
            Commands::History { sort, page, .. } => {
                assert_eq!(sort.as_deref(), Some("-tonnage"));
                assert_eq!(page, Some(2));
            }
            _ => panic!("expected history"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
