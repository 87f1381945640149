use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use marque_forecast::output::write_records;
use marque_forecast::pipeline::{ForecastPipeline, DEFAULT_TOP_BRANDS, DEFAULT_TOP_STATES};
use marque_forecast::source::CsvSource;

/// Forecast next-year vehicle brand purchases per state from a wide survey
/// table.
#[derive(Parser, Debug)]
#[command(name = "marque-forecast", version, about)]
struct Args {
    /// Input CSV with entity_id, state, MAKE1..MAKE4, YEAR1..YEAR4 columns.
    input: PathBuf,

    /// Output CSV for historical and forecast rows.
    #[arg(short, long, default_value = "forecast_results.csv")]
    output: PathBuf,

    /// Number of top states to model.
    #[arg(long, default_value_t = DEFAULT_TOP_STATES)]
    states: usize,

    /// Number of top brands per state to model.
    #[arg(long, default_value_t = DEFAULT_TOP_BRANDS)]
    brands: usize,
}

fn main() -> marque_forecast::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let source = CsvSource::new(&args.input);
    let pipeline = ForecastPipeline::with_limits(args.states, args.brands);

    let records = pipeline.run(&source)?;
    write_records(&args.output, &records)?;
    tracing::info!(
        records = records.len(),
        output = %args.output.display(),
        "forecasts written"
    );
    Ok(())
}
