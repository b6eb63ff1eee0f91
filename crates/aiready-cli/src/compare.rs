//! `aiready compare <url_a> <url_b>`: analyze two URLs and diff them.

use aiready_analyzer::{comparison_markdown, Analyzer};

use crate::analyze::persist_best_effort;

/// Analyzes both URLs concurrently and prints the pair plus their
/// comparison as pretty JSON (or the comparison alone as Markdown).
pub(crate) async fn run(url_a: &str, url_b: &str, markdown: bool) -> anyhow::Result<()> {
    let config = aiready_core::load_app_config()?;
    let analyzer = Analyzer::from_config(&config)?;

    let (report_a, report_b, comparison) = analyzer.analyze_pair(url_a, url_b).await?;

    if markdown {
        println!("{}", comparison_markdown(&comparison));
    } else {
        let payload = serde_json::json!({
            "report_a": report_a,
            "report_b": report_b,
            "comparison": comparison,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }

    persist_best_effort(&config, &report_a).await;
    persist_best_effort(&config, &report_b).await;
    Ok(())
}
