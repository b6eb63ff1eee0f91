//! `aiready history <url>`: latest and previous stored scans.

use aiready_db::ReportRow;

/// Prints the latest and previous Reports for `url` as pretty JSON.
///
/// Requires `DATABASE_URL`; a URL with exactly one stored scan prints
/// `previous: null` rather than failing.
pub(crate) async fn run(url: &str) -> anyhow::Result<()> {
    let config = aiready_core::load_app_config()?;
    let Some(database_url) = &config.database_url else {
        anyhow::bail!("History not configured; set DATABASE_URL");
    };

    let canonical = aiready_analyzer::canonicalize(url)?;

    let pool_config = aiready_db::PoolConfig::from_app_config(&config);
    let pool = aiready_db::connect_pool(database_url, pool_config).await?;
    aiready_db::run_migrations(&pool).await?;

    let (latest, previous) = aiready_db::get_history(&pool, &canonical).await?;
    let latest = latest.map(ReportRow::into_report).transpose()?;
    let previous = previous.map(ReportRow::into_report).transpose()?;

    let payload = serde_json::json!({
        "url": canonical,
        "latest": latest,
        "previous": previous,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
