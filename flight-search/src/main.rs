use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use flight_search::airblue::{
    AirblueClient, AirblueConfig, AirblueError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
use flight_search::render::{SearchReport, render_json, render_text};
use flight_search::search::find_itineraries;
use flight_search::validate::{
    DEFAULT_MAX_ADVANCE_DAYS, SearchRequest, ValidationConfig, ValidationError,
};

/// Search Airblue for one-way or round-trip flights, cheapest first.
#[derive(Parser, Debug)]
#[command(name = "flight-search", version, about)]
struct Cli {
    /// Departure airport IATA code (e.g. KHI)
    origin: String,

    /// Arrival airport IATA code (e.g. ISB)
    destination: String,

    /// Departure date, YYYY-MM-DD
    departure: String,

    /// Return date, YYYY-MM-DD; omit for a one-way search
    return_date: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Booking site root URL
    #[arg(long, env = "AIRBLUE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "AIRBLUE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// How many days ahead a departure may be booked
    #[arg(long, default_value_t = DEFAULT_MAX_ADVANCE_DAYS)]
    max_advance_days: i64,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Airblue(#[from] AirblueError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not encode results: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// The single line printed to stderr when a search fails.
fn failure_message(error: &CliError) -> String {
    match error {
        CliError::Airblue(AirblueError::RateLimited) => {
            "Sorry, the server is overloaded. Try again later.".to_string()
        }
        other => format!("Error: {other}"),
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let config = AirblueConfig::default()
        .with_base_url(cli.base_url)
        .with_timeout(cli.timeout_secs);
    let client = AirblueClient::new(config)?;

    let served = client.fetch_airport_codes().await?;
    let today = chrono::Local::now().date_naive();
    let request = SearchRequest::validate(
        &cli.origin,
        &cli.destination,
        &cli.departure,
        cli.return_date.as_deref(),
        &served,
        today,
        &ValidationConfig::new(cli.max_advance_days),
    )?;
    debug!(?request, "validated search");

    let document = client.fetch_results_page(&request).await?;
    let results = find_itineraries(&document, &request);
    let report = SearchReport::from_results(&results);

    if cli.json {
        let mut json = render_json(&report)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_text(&report))
    }
}
