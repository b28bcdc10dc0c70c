mod discover;
mod seed;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "mercado-cli")]
#[command(about = "Mercado marketplace command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the store catalog the way the marketplace page does.
    Discover(discover::DiscoverArgs),
    /// Resolve a city name against the static geocoding table.
    Geocode {
        /// City name as configured, e.g. "São Paulo, SP".
        query: String,
    },
    /// Sync the category catalog from config/categories.yaml into the database.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Discover(args) => discover::run(args).await,
        Commands::Geocode { query } => geocode(&query),
        Commands::Seed => seed::run().await,
    }
}

/// Table lookup only; the CLI never calls the remote geocoder.
fn geocode(query: &str) -> anyhow::Result<()> {
    let table = load_city_table()?;
    match table.lookup(query) {
        Some(coordinate) => {
            println!("{query}: ({}, {})", coordinate.latitude, coordinate.longitude);
        }
        None => {
            let fallback = table.fallback();
            println!(
                "'{query}' is not in the city table; fallback is ({}, {})",
                fallback.latitude, fallback.longitude
            );
        }
    }
    Ok(())
}

/// The geocode command works without a database, so the cities path is read
/// directly instead of requiring the full app config (and its DATABASE_URL).
fn load_city_table() -> anyhow::Result<mercado_geo::CityTable> {
    let path = std::env::var("MERCADO_CITIES_PATH")
        .unwrap_or_else(|_| "./config/cities.yaml".to_string());
    Ok(mercado_geo::CityTable::load(std::path::Path::new(&path))?)
}
