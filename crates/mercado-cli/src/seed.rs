//! The `seed` command: push the static category catalog into the database.

pub(crate) async fn run() -> anyhow::Result<()> {
    let config = mercado_core::load_app_config()?;
    let categories_file = mercado_core::load_categories(&config.categories_path)?;

    let pool_config = mercado_db::PoolConfig::from_app_config(&config);
    let pool = mercado_db::connect_pool(&config.database_url, pool_config).await?;
    mercado_db::run_migrations(&pool).await?;

    let (new_count, updated_count) =
        mercado_db::upsert_categories(&pool, &categories_file.categories).await?;

    tracing::info!(new = new_count, updated = updated_count, "category seed complete");
    println!("categories seeded: {new_count} new, {updated_count} updated");
    Ok(())
}
