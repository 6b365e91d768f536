use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use feedback_store::config::Config;
use feedback_store::demos::movies::{self, FaultSwitch, HttpMoviesClient, Status};
use feedback_store::demos::traffic_light::{self, PhaseTimings};
use feedback_store::logging::init_tracing;
use feedback_store::{Timer, TokioTimer};

#[derive(Parser)]
#[command(name = "feedback-store", version, about = "Run the demo stores headless")]
struct Cli {
    /// Config file (default: ~/.config/feedback-store/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cycle a traffic light driven by delayed middleware events.
    TrafficLight {
        /// Number of color changes to watch before exiting.
        #[arg(long, default_value_t = 6)]
        transitions: usize,
    },
    /// Page through the movie catalogue.
    Movies {
        /// Stop after this many pages.
        #[arg(long, default_value_t = 3)]
        pages: u32,
        /// Simulate failing requests.
        #[arg(long)]
        fail: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    init_tracing(&config.logging.filter);

    match cli.command {
        Command::TrafficLight { transitions } => run_traffic_light(&config, transitions).await,
        Command::Movies { pages, fail } => run_movies(&config, pages, fail).await,
    }
}

async fn run_traffic_light(config: &Config, transitions: usize) -> Result<()> {
    let timer: Arc<dyn Timer> = Arc::new(TokioTimer);
    let store = traffic_light::make_store(PhaseTimings::from(&config.traffic_light), timer);
    let mut states = store.subscribe();
    println!("{:?}", store.state());

    for _ in 0..transitions {
        tokio::select! {
            changed = states.changed() => {
                changed.context("traffic light store stopped")?;
                let light = *states.borrow_and_update();
                println!("{:?}", light);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    store.shutdown();
    store.closed().await;
    Ok(())
}

async fn run_movies(config: &Config, pages: u32, fail: bool) -> Result<()> {
    let faults = FaultSwitch::new(fail || config.movies.simulate_failure);
    if config.movies.resolved_api_key().is_none() {
        tracing::warn!("no movies API key configured; requests will be rejected");
    }
    let client = Arc::new(HttpMoviesClient::from_config(&config.movies, faults));
    let store = movies::make_store(client);
    let mut states = store.subscribe();

    loop {
        let state = states.borrow_and_update().clone();
        match &state.status {
            Status::Failed(message) => {
                tracing::error!(page = state.next_page(), %message, "loading failed");
                break;
            }
            Status::Idle => {
                tracing::info!(movies = state.movies.len(), "catalogue exhausted");
                break;
            }
            Status::Loading if state.batch.page >= pages => {
                tracing::info!(pages = state.batch.page, "page limit reached");
                break;
            }
            Status::Loading => {
                tracing::info!(page = state.next_page(), movies = state.movies.len(), "loading");
            }
        }

        tokio::select! {
            changed = states.changed() => changed.context("movies store stopped")?,
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    store.shutdown();
    store.closed().await;

    for movie in store.state().movies {
        match movie.poster_url_with(&config.movies.image_base_url) {
            Some(poster) => println!("{} ({})", movie.title, poster),
            None => println!("{}", movie.title),
        }
    }
    Ok(())
}
