//! `aiready analyze <url>`: run the pipeline for one URL.

use aiready_analyzer::{report_markdown, Analyzer};
use aiready_core::Report;

/// Analyzes `url` and prints the report as pretty JSON (or Markdown).
///
/// When `DATABASE_URL` is configured the report is also persisted so later
/// `history` lookups can diff against it; persistence failures are warnings,
/// never command failures.
pub(crate) async fn run(url: &str, markdown: bool) -> anyhow::Result<()> {
    let config = aiready_core::load_app_config()?;
    let analyzer = Analyzer::from_config(&config)?;

    let report = analyzer.analyze(url).await?;

    if markdown {
        println!("{}", report_markdown(&report));
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    persist_best_effort(&config, &report).await;
    Ok(())
}

/// Shared by `analyze` and `compare`: store the report when a database is
/// configured, warn and continue otherwise.
pub(crate) async fn persist_best_effort(config: &aiready_core::AppConfig, report: &Report) {
    let Some(database_url) = &config.database_url else {
        return;
    };

    let result: Result<(), aiready_db::DbError> = async {
        let pool_config = aiready_db::PoolConfig::from_app_config(config);
        let pool = aiready_db::connect_pool(database_url, pool_config).await?;
        aiready_db::run_migrations(&pool).await?;
        aiready_db::insert_report(&pool, report).await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => tracing::info!(url = %report.url, "report persisted"),
        Err(e) => {
            tracing::warn!(url = %report.url, error = %e, "report persistence failed");
        }
    }
}
