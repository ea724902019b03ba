//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{
    output_calculation, output_calculation_error, output_history, output_import_report,
    output_recent, output_reference_page, output_resolution,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use vcf_app::app::{
    self, CalculationInput, CalculationServiceError, HistoryQuery, ImportOptions, RECENT_LIMIT,
};
use vcf_app::config::Config;
use vcf_app::repository::{open_history_repo, open_reference_table};
use vcf_domain::service::VcfResolver;
use vcf_store::ReferenceTable;
use vcf_types::{Error, OutputFormat, Result};

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Calculate {
            volume,
            density,
            temperature,
            no_save,
        } => cmd_calculate(
            &config,
            output_format,
            CalculationInput::new(*volume, *density, *temperature),
            !no_save,
        ),

        Commands::Import { file, clear } => {
            cmd_import(&config, output_format, file.clone(), *clear)
        }

        Commands::Lookup {
            density,
            temperature,
        } => cmd_lookup(&config, output_format, *density, *temperature),

        Commands::History { search, sort, page } => {
            let query = HistoryQuery {
                search: search.clone(),
                sort: sort.clone(),
                page: *page,
            };
            cmd_history(&config, output_format, &query)
        }

        Commands::Recent => cmd_recent(&config, output_format),

        Commands::Table { page } => cmd_table(&config, output_format, *page),

        Commands::Config {
            show,
            set_output,
            set_data_dir,
            reset,
        } => cmd_config(*show, *set_output, set_data_dir.clone(), *reset),
    }
}

/// Open the reference table, warning when every lookup would fall back
fn open_table(config: &Config) -> Result<ReferenceTable> {
    let table = open_reference_table(config)?;
    debug!(entries = table.len(), "reference table opened");
    if table.is_empty() {
        warn!("reference table is empty; every lookup uses the default VCF");
    }
    Ok(table)
}

fn cmd_calculate(
    config: &Config,
    output_format: OutputFormat,
    input: CalculationInput,
    save: bool,
) -> Result<()> {
    let table = open_table(config)?;

    let result = if save {
        let history = open_history_repo(config)?;
        app::calculate_and_record(&table, &history, input)
            .map(|(calculation, record)| (calculation, Some(record)))
    } else {
        app::calculate(&table, input).map(|calculation| (calculation, None))
    };

    match result {
        Ok((calculation, record)) => output_calculation(
            output_format,
            &calculation,
            record.as_ref(),
            config.tonnage_decimals,
            config.vcf_decimals,
        ),
        Err(CalculationServiceError::InvalidInput(message)) => {
            output_calculation_error(output_format, &message)?;
            Err(Error::InvalidInput(message))
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_import(
    config: &Config,
    output_format: OutputFormat,
    file: PathBuf,
    clear: bool,
) -> Result<()> {
    let table = open_reference_table(config)?;
    let options = ImportOptions::new().with_clear(clear);

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Importing {}", file.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = app::import_reference_data(&table, &file, &options);
    spinner.finish_and_clear();

    let report = result?;
    output_import_report(output_format, &report)
}

fn cmd_lookup(
    config: &Config,
    output_format: OutputFormat,
    density: f64,
    temperature: f64,
) -> Result<()> {
    let table = open_table(config)?;
    let resolution = VcfResolver::new(&table).resolve(density, temperature);
    output_resolution(output_format, density, temperature, &resolution)
}

fn cmd_history(config: &Config, output_format: OutputFormat, query: &HistoryQuery) -> Result<()> {
    let history = open_history_repo(config)?;
    let page = app::search_history(&history, query, config.history_page_size)?;
    output_history(
        output_format,
        &page,
        config.tonnage_decimals,
        config.vcf_decimals,
    )
}

fn cmd_recent(config: &Config, output_format: OutputFormat) -> Result<()> {
    let history = open_history_repo(config)?;
    let records = app::recent_calculations(&history, RECENT_LIMIT)?;
    output_recent(
        output_format,
        &records,
        config.tonnage_decimals,
        config.vcf_decimals,
    )
}

fn cmd_table(config: &Config, output_format: OutputFormat, page: Option<usize>) -> Result<()> {
    let table = open_reference_table(config)?;
    let page = table.page(page, config.table_page_size);
    output_reference_page(output_format, &page)
}

fn cmd_config(
    show: bool,
    set_output: Option<OutputFormat>,
    set_data_dir: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
