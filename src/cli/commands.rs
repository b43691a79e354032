//! Command implementations for the canal discharge CLI
//!
//! Loads the dataset once through the store, applies the consumer-side
//! filters and renders the requested report.

use crate::app::models::{DischargeRecord, Season};
use crate::app::services::analytics::{
    calculate_capacity_utilization, calculate_country_share, calculate_multi_year_average,
    calculate_seasonal_analytics, calculate_yearly_comparison, compare_periods,
};
use crate::app::services::catalog::{countries_for_object, extract_catalog, objects_for_segment};
use crate::app::services::discharge_store::{DischargeStore, Snapshot};
use crate::app::services::feed_source::{FeedSource, FileFeedSource, HttpFeedSource};
use crate::cli::args::{Args, Commands, FilterArgs, OutputFormat};
use crate::cli::output::{
    CatalogReport, SeasonalReport, TrendReport, YearlyReport, render_catalog,
    render_country_share, render_load_summary, render_seasonal, render_trend, render_yearly,
    to_json,
};
use crate::config::{Config, ValuePolicy};
use crate::constants::ALL_COUNTRIES;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Main command runner
///
/// Returns the rendered report. Load failures come back as errors for which
/// [`Error::is_load_failure`] is true.
pub async fn run(args: Args) -> Result<String> {
    setup_logging(&args)?;

    info!("Starting canal discharge {}", args.command.name());
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let snapshot = match &args.feed_file {
        Some(path) => {
            let store = DischargeStore::new(FileFeedSource::new(path.clone()), &config);
            load_with_progress(&args, store).await?
        }
        None => {
            let store = DischargeStore::<HttpFeedSource>::from_config(&config);
            load_with_progress(&args, store).await?
        }
    };

    let report = execute(&args.command, &snapshot.records, args.output_format)?;

    if args.output_format == OutputFormat::Table && !args.quiet {
        Ok(format!("{}\n{}", render_load_summary(&snapshot), report))
    } else {
        Ok(report)
    }
}

/// Set up structured logging on stderr
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("canal_discharge={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: defaults, config file, environment, then CLI flags
pub fn load_configuration(args: &Args) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file)?;

    if let Some(url) = &args.feed_url {
        config = config.with_feed_url(url.clone());
    }
    if args.reject_unparsable {
        config = config.with_value_policy(ValuePolicy::RejectRow);
    }

    config.validate()?;
    Ok(config)
}

async fn load_with_progress<S: FeedSource>(
    args: &Args,
    store: DischargeStore<S>,
) -> Result<Arc<Snapshot>> {
    let progress_bar = if args.show_progress() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Loading {}", store.source().describe()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = store.get().await;

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }
    result
}

/// Run one command over the loaded records and render its report
pub fn execute(
    command: &Commands,
    records: &[DischargeRecord],
    format: OutputFormat,
) -> Result<String> {
    match command {
        Commands::Catalog(filters) => {
            let report = catalog_report(records, filters);
            render(format, &report, render_catalog)
        }
        Commands::Seasonal(filters) => {
            let report = seasonal_report(&filters.apply(records));
            render(format, &report, render_seasonal)
        }
        Commands::Yearly(filters) => {
            let report = yearly_report(&filters.apply(records));
            render(format, &report, render_yearly)
        }
        Commands::Countries(filters) => {
            let subset: Vec<DischargeRecord> = records
                .iter()
                .filter(|r| {
                    r.country().code != ALL_COUNTRIES && filters.matches_ignoring_country(r)
                })
                .cloned()
                .collect();
            let shares = calculate_country_share(&subset);
            render(format, &shares, |s: &Vec<_>| render_country_share(s))
        }
        Commands::Trend(filters) => {
            let subset = filters.apply(records);
            let report = TrendReport {
                period: compare_periods(&subset),
                // Capacity is per canal, so utilization needs a single object
                utilization: filters
                    .object
                    .as_ref()
                    .and_then(|_| calculate_capacity_utilization(&subset)),
            };
            render(format, &report, render_trend)
        }
    }
}

fn render<T: serde::Serialize>(
    format: OutputFormat,
    report: &T,
    table: impl Fn(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table(report)),
        OutputFormat::Json => to_json(report),
    }
}

fn catalog_report(records: &[DischargeRecord], filters: &FilterArgs) -> CatalogReport {
    let segment_objects = filters.segment.as_ref().map(|segment| {
        let code = resolve_segment_code(records, segment);
        objects_for_segment(records, &code)
    });
    let object_countries = filters
        .object
        .as_ref()
        .map(|object| countries_for_object(records, object));

    CatalogReport {
        summary: extract_catalog(records),
        segment_objects,
        object_countries,
    }
}

/// Map a segment display name back to its feed code
fn resolve_segment_code(records: &[DischargeRecord], segment: &str) -> String {
    records
        .iter()
        .map(|r| r.segment())
        .find(|s| s.display_name == segment)
        .map(|s| s.code.clone())
        .unwrap_or_else(|| segment.to_string())
}

fn seasonal_report(records: &[DischargeRecord]) -> SeasonalReport {
    SeasonalReport {
        vegetation: calculate_seasonal_analytics(
            records.iter().filter(|r| r.season() == Season::Vegetation),
        ),
        non_vegetation: calculate_seasonal_analytics(
            records.iter().filter(|r| r.season() == Season::NonVegetation),
        ),
    }
}

fn yearly_report(records: &[DischargeRecord]) -> YearlyReport {
    let years = calculate_yearly_comparison(records);
    let multi_year_average = calculate_multi_year_average(&years);
    YearlyReport {
        years,
        multi_year_average,
    }
}
