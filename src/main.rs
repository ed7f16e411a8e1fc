use clap::{Parser, Subcommand};
use tracing::{error, info};

use bil24_client::{ApiClient, Bil24Config, Config, Endpoints};

#[derive(Parser)]
#[command(name = "bil24")]
#[command(about = "Bil24 ticketing platform API client")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the API connection with the configured credentials
    TestConnection,
    /// List events
    Events {
        /// Maximum number of events to fetch
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Fetch a single event by its identifier
    Event {
        #[arg(long)]
        id: i64,
    },
    /// List venues
    Venues {
        /// Maximum number of venues to fetch
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Print the remote API version
    Version,
}

/// Prefers config.toml, falls back to BIL24_* environment variables.
fn load_config() -> anyhow::Result<Bil24Config> {
    match Config::load() {
        Ok(config) => Ok(config.bil24),
        Err(_) => Ok(Bil24Config::from_env()?),
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(pretty) => println!("{}", pretty),
        Err(_) => println!("{}", value),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    bil24_client::logging::init_logging();

    let cli = Cli::parse();

    let config = load_config()?;
    let env = config.env;
    let endpoints = Endpoints::new(ApiClient::new(config));

    match cli.command {
        Commands::TestConnection => {
            println!("🔄 Testing connection to the {} environment...", env);
            if endpoints.client().test_connection().await {
                info!("connection test succeeded");
                println!("✅ Connection OK");
            } else {
                error!("connection test failed");
                println!("❌ Connection failed (check credentials and environment)");
                std::process::exit(1);
            }
        }
        Commands::Events { limit } => {
            let mut params = Vec::new();
            if let Some(limit) = limit {
                params.push(("limit", limit.to_string()));
            }
            let events = endpoints.get_events(&params).await?;
            print_json(&events);
        }
        Commands::Event { id } => {
            let event = endpoints.get_event(id).await?;
            print_json(&event);
        }
        Commands::Venues { limit } => {
            let mut params = Vec::new();
            if let Some(limit) = limit {
                params.push(("limit", limit.to_string()));
            }
            let venues = endpoints.get_venues(&params).await?;
            print_json(&venues);
        }
        Commands::Version => {
            let version = endpoints.get_version().await?;
            print_json(&version);
        }
    }

    Ok(())
}
