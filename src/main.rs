//! FeedSim CLI - Social Feed Simulator
//!
//! Usage:
//!   feedsim serve [OPTIONS]               Start the mock HTTP server
//!   feedsim generate [HANDLE] [OPTIONS]   Print simulated data as JSON
//!
//! Examples:
//!   feedsim serve --port 8080
//!   feedsim serve --config config.yaml
//!   feedsim generate john.doe --kind posts

use clap::{Parser, Subcommand, ValueEnum};
use feedsim::cli::{Config, ConfigError, Overrides};
use feedsim::{analytics_for, posts_for, profile_for, reels_for};

#[derive(Parser)]
#[command(name = "feedsim")]
#[command(author, version, about = "Social Feed Simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the FeedSim HTTP server
    Serve {
        /// Configuration file path (YAML)
        #[arg(short, long)]
        config: Option<String>,

        /// Port to listen on [default: 8080]
        #[arg(short, long, env = "FEEDSIM_PORT")]
        port: Option<u16>,

        /// Host to bind to [default: 0.0.0.0]
        #[arg(long, env = "FEEDSIM_HOST")]
        host: Option<String>,

        /// Rate of simulated user-not-found answers (0.0-1.0)
        #[arg(long, env = "FEEDSIM_USER_NOT_FOUND_RATE")]
        user_not_found_rate: Option<f64>,

        /// Rate of simulated provider errors (0.0-1.0)
        #[arg(long, env = "FEEDSIM_UPSTREAM_ERROR_RATE")]
        upstream_error_rate: Option<f64>,

        /// Rate of simulated empty media answers (0.0-1.0)
        #[arg(long, env = "FEEDSIM_EMPTY_MEDIA_RATE")]
        empty_media_rate: Option<f64>,
    },
    /// Print simulated data for a handle
    Generate {
        /// Handle to simulate (defaults to the configured demo handle)
        handle: Option<String>,

        /// Which resource to print
        #[arg(short, long, value_enum, default_value = "all")]
        kind: Kind,

        /// Configuration file path (YAML)
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Profile,
    Posts,
    Reels,
    Analytics,
    All,
}

fn load_config(config_file: Option<String>) -> Result<Config, ConfigError> {
    match config_file {
        Some(path) => Config::from_file(&path),
        None => Ok(Config::default()),
    }
}

fn build_config(config_file: Option<String>, overrides: Overrides) -> Result<Config, ConfigError> {
    let mut config = load_config(config_file)?;
    config.apply_overrides(overrides);
    config.validate()?;
    Ok(config)
}

fn generate(handle: &str, kind: Kind) -> Result<String, serde_json::Error> {
    match kind {
        Kind::Profile => serde_json::to_string_pretty(&profile_for(handle)),
        Kind::Posts => serde_json::to_string_pretty(&posts_for(handle)),
        Kind::Reels => serde_json::to_string_pretty(&reels_for(handle)),
        Kind::Analytics => serde_json::to_string_pretty(&analytics_for(handle)),
        Kind::All => serde_json::to_string_pretty(&serde_json::json!({
            "profile": profile_for(handle),
            "posts": posts_for(handle),
            "reels": reels_for(handle),
            "analytics": analytics_for(handle),
        })),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("feedsim=info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            port,
            host,
            user_not_found_rate,
            upstream_error_rate,
            empty_media_rate,
        } => {
            init_tracing();
            let overrides = Overrides {
                port,
                host,
                user_not_found_rate,
                upstream_error_rate,
                empty_media_rate,
            };
            let config = build_config(config, overrides)?;
            feedsim::cli::run_server(config).await?;
        }
        Commands::Generate {
            handle,
            kind,
            config,
        } => {
            let handle = match handle {
                Some(handle) => handle,
                None => load_config(config)?.simulator.demo_handle,
            };
            println!("{}", generate(&handle, kind)?);
        }
    }

    Ok(())
}
