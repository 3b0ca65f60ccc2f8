#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line interface for building prevalence map artifacts.
//!
//! Three subcommands over the same pair of inputs: `build` writes the
//! summary CSV and choropleth GeoJSON to an output directory, `table`
//! prints the classified ranking, and `overview` prints whole-table
//! statistics.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use prevalence_map_pipeline::SummaryTable;
use prevalence_map_summary_models::TableOverview;

mod config;

#[derive(Parser)]
#[command(
    name = "prevalence_map",
    about = "Regional prevalence summaries and choropleth artifacts from survey data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and write summary.csv and regions.geojson
    Build {
        /// Survey records CSV
        #[arg(long)]
        records: PathBuf,
        /// Administrative boundary GeoJSON
        #[arg(long)]
        boundaries: PathBuf,
        /// TOML dataset definition overriding default column names
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output directory for generated artifacts
        #[arg(long, default_value = "artifacts")]
        output_dir: PathBuf,
    },
    /// Print the classified, ranked region table
    Table {
        /// Survey records CSV
        #[arg(long)]
        records: PathBuf,
        /// Administrative boundary GeoJSON
        #[arg(long)]
        boundaries: PathBuf,
        /// TOML dataset definition overriding default column names
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print whole-table overview statistics
    Overview {
        /// Survey records CSV
        #[arg(long)]
        records: PathBuf,
        /// Administrative boundary GeoJSON
        #[arg(long)]
        boundaries: PathBuf,
        /// TOML dataset definition overriding default column names
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            records,
            boundaries,
            config,
            output_dir,
        } => {
            let started = std::time::Instant::now();
            let table = build_table(&records, &boundaries, config.as_deref())?;
            prevalence_map_export::write_artifacts(&table, &output_dir)?;
            log::info!("build complete in {:.1}s", started.elapsed().as_secs_f64());
            println!("wrote {} regions to {}", table.len(), output_dir.display());
        }
        Commands::Table {
            records,
            boundaries,
            config,
        } => {
            let table = build_table(&records, &boundaries, config.as_deref())?;
            print_table(&table);
        }
        Commands::Overview {
            records,
            boundaries,
            config,
        } => {
            let table = build_table(&records, &boundaries, config.as_deref())?;
            print_overview(&prevalence_map_pipeline::overview(&table));
        }
    }

    Ok(())
}

/// Loads both inputs per the dataset definition and runs the pipeline.
fn build_table(
    records_path: &Path,
    boundaries_path: &Path,
    config_path: Option<&Path>,
) -> Result<SummaryTable, Box<dyn std::error::Error>> {
    let definition = config::load_dataset_definition(config_path)?;

    let records = prevalence_map_survey::load_survey_records(records_path, &definition.records)?;
    let features =
        prevalence_map_boundary::load_boundary_features(boundaries_path, &definition.boundaries)?;

    Ok(prevalence_map_pipeline::run(
        &records,
        features,
        &definition.records.vocabulary,
    ))
}

fn print_table(table: &SummaryTable) {
    println!(
        "{:>4}  {:<24} {:>9} {:>7} {:>9}  {}",
        "rank", "region", "subjects", "cases", "percent", "category"
    );
    for region in table.by_rate_descending() {
        let row = &region.summary;
        let rank = if row.rank == 0 {
            "-".to_string()
        } else {
            row.rank.to_string()
        };
        println!(
            "{rank:>4}  {:<24} {:>9} {:>7} {:>8.2}%  {}",
            row.region_name,
            row.subject_count,
            row.case_count,
            row.rate_percent,
            row.category
        );
    }
}

fn print_overview(stats: &TableOverview) {
    println!("regions:        {}", stats.region_count);
    println!("with subjects:  {}", stats.surveyed_region_count);
    println!("subjects:       {}", stats.subject_total);
    println!("cases:          {}", stats.case_total);
    println!("overall rate:   {:.2}%", stats.overall_rate_percent);

    let dominant = stats
        .dominant_tier
        .map_or_else(|| "-".to_string(), |tier| tier.to_string());
    println!("dominant tier:  {dominant}");
    for entry in &stats.tier_counts {
        println!("  {:<8} {}", entry.tier, entry.count);
    }

    if let Some(max) = stats.max_rate_percent {
        println!("highest rate:   {max:.2}%");
    }
    if let Some(min) = stats.min_rate_percent {
        println!("lowest rate:    {min:.2}%");
    }
    if !stats.unsurveyed_regions.is_empty() {
        println!("without data:   {}", stats.unsurveyed_regions.join(", "));
    }
}
