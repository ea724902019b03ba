//! Output formatting module

use serde::Serialize;
use vcf_app::app::{CalculationResponse, HistoryPage, ImportReport};
use vcf_domain::model::{CalculationRecord, ReferenceEntry};
use vcf_domain::service::{TonnageCalculation, VcfResolution, VcfSource};
use vcf_types::{OutputFormat, Page, Result};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

fn source_description(source: &VcfSource) -> String {
    match source {
        VcfSource::Exact => "exact match".to_string(),
        VcfSource::Neighborhood {
            density,
            temperature,
        } => format!("nearby entry ({:?} kg/m³, {:?}°C)", density, temperature),
        VcfSource::Default => "no entry, default used".to_string(),
    }
}

pub fn output_calculation(
    output_format: OutputFormat,
    calculation: &TonnageCalculation,
    record: Option<&CalculationRecord>,
    tonnage_decimals: usize,
    vcf_decimals: usize,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&CalculationResponse::success(
            calculation,
            tonnage_decimals,
            vcf_decimals,
        ));
    }

    println!("\nCalculation Result");
    println!("==================");
    println!("Volume:          {} L", calculation.volume);
    println!(
        "Density:         {} kg/m³ (grid {:?})",
        calculation.density, calculation.point.density
    );
    println!(
        "Temperature:     {} °C (grid {:?})",
        calculation.temperature, calculation.point.temperature
    );
    println!(
        "VCF:             {:.*} ({})",
        vcf_decimals,
        calculation.vcf,
        source_description(&calculation.source)
    );
    println!(
        "Tonnage:         {:.*} MT",
        tonnage_decimals, calculation.tonnage
    );

    if let Some(record) = record {
        println!("\nRecorded as {}", record.id);
    }

    Ok(())
}

pub fn output_calculation_error(output_format: OutputFormat, message: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        print_json(&CalculationResponse::failure(message))?;
    }
    Ok(())
}

pub fn output_resolution(
    output_format: OutputFormat,
    density: f64,
    temperature: f64,
    resolution: &VcfResolution,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(resolution);
    }

    println!("\nVCF Lookup");
    println!("==========");
    println!("Input:           {:?} kg/m³, {:?}°C", density, temperature);
    println!(
        "Grid point:      {:?} kg/m³, {:?}°C",
        resolution.point.density, resolution.point.temperature
    );
    println!("Exact match:     {}", yes_no(resolution.source == VcfSource::Exact));
    if resolution.source != VcfSource::Exact {
        println!(
            "Neighborhood:    {}",
            yes_no(matches!(resolution.source, VcfSource::Neighborhood { .. }))
        );
    }
    println!("Source:          {}", source_description(&resolution.source));
    println!("VCF:             {:?}", resolution.vcf);

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

pub fn output_import_report(output_format: OutputFormat, report: &ImportReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(report);
    }

    println!("Import complete: {} ({})", report.path.display(), report.format);
    if report.statements > 0 {
        println!("  Statements:            {}", report.statements);
    }
    println!("  Rows examined:         {}", report.rows);
    if report.cleared > 0 {
        println!("  Cleared:               {}", report.cleared);
    }
    println!("  Imported:              {}", report.inserted);
    println!("  Skipped (duplicates):  {}", report.duplicates);
    println!("  Skipped (invalid):     {}", report.skipped.len());
    println!("  Total entries in table: {}", report.total_entries);

    if !report.skipped.is_empty() {
        println!();
        println!("Invalid rows:");
        for row in &report.skipped {
            println!("  {} ({})", truncate(&row.raw, 60), row.reason);
        }
    }

    Ok(())
}

fn print_record_header() {
    println!(
        "{:>12} {:>10} {:>8} {:>8} {:>12} {:>16}",
        "Volume(L)", "Density", "Temp", "VCF", "Tonnage(MT)", "Date"
    );
    println!("{}", "-".repeat(71));
}

fn print_record_row(record: &CalculationRecord, tonnage_decimals: usize, vcf_decimals: usize) {
    println!(
        "{:>12} {:>10} {:>8} {:>8.*} {:>12.*} {:>16}",
        record.volume,
        record.density,
        record.temperature,
        vcf_decimals,
        record.vcf,
        tonnage_decimals,
        record.tonnage,
        record.created_at.format("%Y-%m-%d %H:%M")
    );
}

pub fn output_history(
    output_format: OutputFormat,
    history: &HistoryPage,
    tonnage_decimals: usize,
    vcf_decimals: usize,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(history);
    }

    let page = &history.page;
    println!("Calculation History");
    println!("===================");
    if !history.search.is_empty() {
        println!("Search: \"{}\"", history.search);
    }
    println!(
        "Sort: {}  Page {}/{}  ({} calculations)",
        history.sort, page.number, page.total_pages, page.total_items
    );
    println!();

    if page.items.is_empty() {
        println!("No calculations found.");
        return Ok(());
    }

    print_record_header();
    for record in &page.items {
        print_record_row(record, tonnage_decimals, vcf_decimals);
    }

    if page.has_next() {
        println!();
        println!("Next page: --page {}", page.number + 1);
    }

    Ok(())
}

pub fn output_recent(
    output_format: OutputFormat,
    records: &[CalculationRecord],
    tonnage_decimals: usize,
    vcf_decimals: usize,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(records);
    }

    println!("Recent Calculations");
    println!("===================");

    if records.is_empty() {
        println!("No calculations yet.");
        return Ok(());
    }

    print_record_header();
    for record in records {
        print_record_row(record, tonnage_decimals, vcf_decimals);
    }

    Ok(())
}

pub fn output_reference_page(
    output_format: OutputFormat,
    page: &Page<ReferenceEntry>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(page);
    }

    println!("VCF Reference Table");
    println!("===================");
    println!(
        "Page {}/{}  ({} entries)",
        page.number, page.total_pages, page.total_items
    );
    println!();

    if page.items.is_empty() {
        println!("Table is empty. Load data with: vcf-tonnage import <file>");
        return Ok(());
    }

    println!("{:>12} {:>12} {:>10}", "Density", "Temp(°C)", "VCF");
    println!("{}", "-".repeat(36));
    for entry in &page.items {
        println!(
            "{:>12} {:>12} {:>10}",
            format!("{:?}", entry.density),
            format!("{:?}", entry.temperature),
            format!("{:?}", entry.vcf)
        );
    }

    if page.has_next() {
        println!();
        println!("Next page: --page {}", page.number + 1);
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
