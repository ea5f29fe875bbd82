//! Water Quality AI - Command line console

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use water_quality_core::api::{self, datalab};
use water_quality_core::constants::{APP_NAME, APP_VERSION};
use water_quality_core::logic::datalab::{ImputationStrategy, SessionId};
use water_quality_core::logic::live::{LiveMonitor, ReadingSource, SensorSimulator};
use water_quality_core::logic::parameters::{self, WaterParameter};
use water_quality_core::logic::prediction::{coerce, PredictionRequest};
use water_quality_core::ui::{render, ViewState};
use water_quality_core::{ClientConfig, ClientError, PredictionClient, Result};

#[derive(Debug, Parser)]
#[command(
    name = "wq",
    version,
    about = "Water potability predictions, model stats and the Data Lab workflow",
    long_about = "wq talks to the Water Quality AI prediction backend.\n\n\
        EXAMPLES:\n\
        \n  wq predict ph=7.1 Hardness=204 Turbidity=3.8 ...   Classify one set of readings\n\
        \n  wq predict --sample                               Classify a random backend sample\n\
        \n  wq live --simulate                                Stream simulated sensor readings\n\
        \n  wq lab upload water.csv                           Start a Data Lab session"
)]
struct Cli {
    /// Increase verbosity (-v for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Backend base URL (overrides WQ_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify one set of readings
    Predict(PredictArgs),

    /// Show a random sample from the backend
    Sample,

    /// Model statistics dashboard
    Stats,

    /// Backend health
    Health,

    /// Forecast the next pH from recent readings
    Forecast {
        #[arg(value_name = "PH", required = true)]
        history: Vec<f64>,
    },

    /// Poll readings and classify them periodically
    Live(LiveArgs),

    /// AutoML Data Lab steps
    Lab {
        #[command(subcommand)]
        step: LabCommand,
    },
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Readings as key=value, e.g. ph=7.0 Organic_carbon=10
    #[arg(value_name = "KEY=VALUE")]
    readings: Vec<String>,

    /// Start from a backend sample; given readings override it
    #[arg(long)]
    sample: bool,
}

#[derive(Debug, Args)]
struct LiveArgs {
    /// Seconds between polls (overrides WQ_LIVE_INTERVAL_SECS)
    #[arg(long, value_name = "SECS")]
    interval: Option<u64>,

    /// Stop after this many updates
    #[arg(long)]
    count: Option<u64>,

    /// Use the local sensor simulator instead of /sample
    #[arg(long)]
    simulate: bool,

    /// Simulator seed
    #[arg(long, requires = "simulate")]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum LabCommand {
    /// Upload a CSV dataset
    Upload { file: PathBuf },
    /// Use the bundled sample dataset
    UseSample,
    /// First rows of the dataset
    Preview { session: SessionId },
    /// Exploratory analysis
    Eda { session: SessionId },
    /// Impute missing values (median by default)
    Impute {
        session: SessionId,
        #[arg(value_name = "COLUMN=STRATEGY", value_parser = datalab::parse_override)]
        overrides: Vec<(String, ImputationStrategy)>,
    },
    /// Raw vs cleaned distributions
    Compare { session: SessionId },
    /// Train a model on the cleaned data
    Train { session: SessionId },
    /// Download the trained model
    Download {
        session: SessionId,
        #[arg(short, long, default_value = "model.pkl")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    let level = if cli.verbose > 0 { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    log::debug!("Starting {} v{}", APP_NAME, APP_VERSION);

    if let Err(e) = parameters::init() {
        log::error!("Parameter table invalid: {}", e);
        return ExitCode::FAILURE;
    }

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url.clone() {
        config = config.with_api_url(url);
    }

    let client = match PredictionClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, client).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, client: PredictionClient) -> Result<ExitCode> {
    let json = cli.json;

    let code = match &cli.command {
        Command::Predict(args) => {
            let request = build_request(&client, args).await?;
            if !json {
                println!("{}", render::render_form(&request));
            }
            let view = api::predict(&client, &request).await;
            emit(json, &view, render::render_presentation)?
        }
        Command::Sample => {
            let sample = api::sample(&client).await;
            emit(json, &ViewState::Populated(sample), render::render_form)?
        }
        Command::Stats => emit(json, &api::stats(&client).await, render::render_stats)?,
        Command::Health => emit(json, &api::health(&client).await, render::render_health)?,
        Command::Forecast { history } => {
            emit(json, &api::forecast(&client, history.clone()).await, render::render_forecast)?
        }
        Command::Live(args) => run_live(&client, args, json).await?,
        Command::Lab { step } => run_lab(&client, step, json).await?,
    };
    Ok(code)
}

/// Readings from `key=value` pairs, optionally on top of a backend sample
async fn build_request(client: &PredictionClient, args: &PredictArgs) -> Result<PredictionRequest> {
    let pairs = args
        .readings
        .iter()
        .map(|raw| {
            raw.split_once('=')
                .ok_or_else(|| ClientError::InvalidInput(format!("Expected key=value, got {}", raw)))
        })
        .collect::<Result<Vec<_>>>()?;

    if !args.sample {
        return Ok(PredictionRequest::from_form(pairs)?);
    }

    let mut request = api::sample(client).await;
    for (key, raw) in pairs {
        request.set(WaterParameter::from_key(key)?, coerce(raw));
    }
    Ok(request)
}

async fn run_live(client: &PredictionClient, args: &LiveArgs, json: bool) -> Result<ExitCode> {
    let secs = args.interval.unwrap_or(client.config().live_interval_secs).max(1);
    let source = if args.simulate {
        ReadingSource::Simulator(args.seed.map(SensorSimulator::seeded).unwrap_or_default())
    } else {
        ReadingSource::Backend
    };

    let mut monitor = LiveMonitor::new(client.clone(), Duration::from_secs(secs));
    let mut updates = monitor.start(source).await;
    let mut received = 0u64;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            update = updates.recv() => {
                let Some(update) = update else { break };
                if json {
                    println!("{}", serde_json::to_string(&update)?);
                } else {
                    println!("{}", render::render_live_update(&update));
                }
                received += 1;
                if args.count.is_some_and(|n| received >= n) {
                    break;
                }
            }
        }
    }

    monitor.stop().await;
    Ok(ExitCode::SUCCESS)
}

async fn run_lab(client: &PredictionClient, step: &LabCommand, json: bool) -> Result<ExitCode> {
    let code = match step {
        LabCommand::Upload { file } => {
            let view = datalab::upload(client, file).await;
            emit(json, &view, render::render_session)?
        }
        LabCommand::UseSample => {
            let view = datalab::use_sample(client).await;
            emit(json, &view, render::render_session)?
        }
        LabCommand::Preview { session } => {
            emit(json, &datalab::preview(client, *session).await, render::render_preview)?
        }
        LabCommand::Eda { session } => {
            emit(json, &datalab::analyze(client, *session).await, render::render_eda)?
        }
        LabCommand::Impute { session, overrides } => {
            let view = datalab::clean(client, *session, overrides).await;
            emit(json, &view, render::render_impute)?
        }
        LabCommand::Compare { session } => {
            emit(json, &datalab::compare(client, *session).await, render::render_comparison)?
        }
        LabCommand::Train { session } => {
            emit(json, &datalab::train(client, *session).await, render::render_training)?
        }
        LabCommand::Download { session, output } => {
            let view = datalab::download(client, *session, output).await;
            emit(json, &view, |a| {
                format!("Saved {} ({} bytes, sha256 {})", a.path.display(), a.size, a.sha256)
            })?
        }
    };

    Ok(code)
}

/// Print a view; failures exit non-zero
fn emit<T: Serialize>(
    json: bool,
    state: &ViewState<T>,
    populated: impl FnOnce(&T) -> String,
) -> Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
    } else {
        println!("{}", render::render_state(state, populated));
    }

    Ok(if state.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
