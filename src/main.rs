use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use peakcast::{
    analysis::calculate_future_production,
    config::PipelineConfig,
    io::{read_production_csv, write_report_json, UrrTable},
    models::{Unit, EJ_PER_GB},
    visualization::{
        print_cumulative_table, print_estimates_table, print_fit_table, render_forecast_chart,
    },
    Forecaster,
};

#[derive(Parser)]
#[command(
    name = "peakcast",
    about = "Peak-production forecasting with Hubbert and Laherrère depletion curves",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full forecasting pipeline from a TOML configuration
    Forecast {
        /// Path to the configuration TOML file
        #[arg(short, long)]
        config: PathBuf,

        /// URR estimate key to use from the configured estimate table
        #[arg(short, long, default_value = "Estimate1")]
        urr_key: String,

        /// Write a JSON forecast report to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,

        /// Skip chart rendering
        #[arg(long)]
        no_chart: bool,
    },

    /// Fit both models against a CSV dataset and a literal URR value
    Fit {
        /// Path to the production CSV (Year, Production columns)
        #[arg(short, long)]
        input: PathBuf,

        /// Ultimate recoverable resources, in the dataset's unit
        #[arg(short, long)]
        urr: f64,

        /// Display unit (EJ or Gb)
        #[arg(long, default_value = "EJ")]
        unit: String,
    },

    /// List the URR estimates available in the configured table
    Estimates {
        /// Path to the configuration TOML file
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast {
            config,
            urr_key,
            json,
            pretty,
            no_chart,
        } => {
            let config = PipelineConfig::from_path(&config)?;

            println!(
                "\n{}",
                format!("Forecast: {}", config.dataset.display())
                    .bold()
                    .cyan()
            );

            let series_ej = read_production_csv(&config.dataset)?;
            let table = UrrTable::from_path(&config.urr_file)?;
            let urr_ej = table.lookup(&urr_key)?;

            // Datasets and the estimate table are in exajoules; convert both
            // sides together so the fit stays unit-consistent.
            let (series, urr) = match config.unit {
                Unit::Exajoules => (series_ej, urr_ej),
                Unit::Gigabarrels => (series_ej.to_gigabarrels(), urr_ej / EJ_PER_GB),
            };

            println!(
                "  Loaded {} observations ({:.0} - {:.0})",
                series.len(),
                series.first_year(),
                series.last_year()
            );
            println!(
                "  Observed peak: {:.2} {}/year",
                series.peak_observed(),
                config.unit
            );
            println!("  URR: {:.1} {} (key: {urr_key})", urr, config.unit);

            let forecaster = Forecaster::new(&series, urr, config.unit);
            let report = forecaster.forecast()?;

            print_fit_table(&report);
            print_cumulative_table(&report);

            if !no_chart {
                let projection =
                    calculate_future_production(&series, &report.laherrere, &report.hubbert, urr)?;
                let chart_path = config.output_path.join(format!("results_{urr_key}.svg"));
                render_forecast_chart(&series, &projection, &report, &chart_path)?;
                println!(
                    "{} Chart written to {}",
                    "Success:".green().bold(),
                    chart_path.display()
                );
            }

            if let Some(json_path) = json {
                write_report_json(&report, &json_path, pretty)?;
                println!(
                    "{} Report written to {}",
                    "Success:".green().bold(),
                    json_path.display()
                );
            }
        }

        Commands::Fit { input, urr, unit } => {
            let unit: Unit = unit.parse()?;
            let series = read_production_csv(&input)?;

            println!(
                "\n{}",
                format!("Model Fit: {}", input.display()).bold().cyan()
            );
            println!(
                "  Loaded {} observations ({:.0} - {:.0})",
                series.len(),
                series.first_year(),
                series.last_year()
            );

            let forecaster = Forecaster::new(&series, urr, unit);
            let report = forecaster.forecast()?;

            print_fit_table(&report);
            print_cumulative_table(&report);
        }

        Commands::Estimates { config } => {
            let config = PipelineConfig::from_path(&config)?;
            let table = UrrTable::from_path(&config.urr_file)?;
            print_estimates_table(&table);
        }
    }

    Ok(())
}
