//! The `discover` command: run the marketplace's store discovery from a
//! terminal against the live catalog.

use clap::Args;
use mercado_core::{Coordinate, FilterSpec, RankedStore, SortBy};

#[derive(Debug, Args)]
pub(crate) struct DiscoverArgs {
    /// Free-text search over store names and descriptions.
    #[arg(long)]
    query: Option<String>,

    /// Category slug, e.g. "pizzaria".
    #[arg(long)]
    category: Option<String>,

    /// Minimum rating, 0-5. Zero means no rating filter.
    #[arg(long, default_value_t = 0.0)]
    min_rating: f64,

    /// Only stores whose maximum delivery estimate fits this many minutes.
    #[arg(long)]
    max_delivery_time: Option<u32>,

    /// Only stores with free delivery.
    #[arg(long)]
    free_delivery: bool,

    /// City name from the static table, e.g. "São Paulo, SP".
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    city: Option<String>,

    /// Explicit latitude; requires --lon.
    #[arg(long, requires = "lon")]
    lat: Option<f64>,

    /// Explicit longitude; requires --lat.
    #[arg(long, requires = "lat")]
    lon: Option<f64>,

    /// Only stores within this many kilometers.
    #[arg(long)]
    max_distance_km: Option<f64>,

    /// Sort order: distance, rating, delivery_time, or delivery_fee.
    #[arg(long)]
    sort_by: Option<SortBy>,
}

pub(crate) async fn run(args: DiscoverArgs) -> anyhow::Result<()> {
    let config = mercado_core::load_app_config()?;
    let pool_config = mercado_db::PoolConfig::from_app_config(&config);
    let pool = mercado_db::connect_pool(&config.database_url, pool_config).await?;

    let category_id = match args.category.as_deref() {
        None => None,
        Some(slug) => {
            let Some(category) = mercado_db::find_category_by_slug(&pool, slug).await? else {
                anyhow::bail!("category '{slug}' not found");
            };
            Some(category.id)
        }
    };

    let user_location = resolve_location(&config, &args)?;

    let spec = FilterSpec {
        search_query: args.query,
        category_id,
        min_rating: args.min_rating,
        max_delivery_time_minutes: args.max_delivery_time,
        free_delivery_only: args.free_delivery,
        user_location,
        max_distance_km: args.max_distance_km,
        sort_by: args.sort_by,
    };

    let rows = mercado_db::list_eligible_stores(&pool, spec.category_id).await?;
    let catalog = rows
        .into_iter()
        .map(mercado_db::EligibleStoreRow::into_record)
        .collect();

    let results = mercado_discovery::discover(catalog, &spec);
    print_results(&results);
    Ok(())
}

fn resolve_location(
    config: &mercado_core::AppConfig,
    args: &DiscoverArgs,
) -> anyhow::Result<Option<Coordinate>> {
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        return Ok(Some(Coordinate::new(lat, lon)));
    }

    let Some(city) = args.city.as_deref() else {
        return Ok(None);
    };

    let table = mercado_geo::CityTable::load(&config.cities_path)?;
    match table.lookup(city) {
        Some(coordinate) => Ok(Some(coordinate)),
        None => {
            tracing::warn!(city, "city not in table; using fallback position");
            Ok(Some(table.fallback()))
        }
    }
}

fn print_results(results: &[RankedStore]) {
    if results.is_empty() {
        println!("no stores matched");
        return;
    }

    println!(
        "{:<36} {:>6} {:>8} {:>9} {:>9}",
        "store", "rating", "fee", "minutes", "km"
    );
    for ranked in results {
        let store = &ranked.store;
        let rating = store
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        let fee = store
            .delivery_fee
            .map_or_else(|| "-".to_string(), |f| format!("{f:.2}"));
        let minutes = match (store.delivery_time_min, store.delivery_time_max) {
            (Some(min), Some(max)) => format!("{min}-{max}"),
            (Some(min), None) => format!("{min}+"),
            _ => "-".to_string(),
        };
        let distance = ranked
            .distance_km
            .map_or_else(|| "-".to_string(), |d| format!("{d:.1}"));
        println!("{:<36} {rating:>6} {fee:>8} {minutes:>9} {distance:>9}", store.name);
    }
    println!("{} store(s)", results.len());
}
