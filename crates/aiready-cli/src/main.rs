mod analyze;
mod compare;
mod history;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "aiready")]
#[command(about = "AI readiness analyzer command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze one URL and print its readiness report.
    Analyze {
        url: String,
        /// Render the report as Markdown instead of JSON.
        #[arg(long)]
        markdown: bool,
    },
    /// Analyze two URLs and print the comparison.
    Compare {
        url_a: String,
        url_b: String,
        /// Render the comparison as Markdown instead of JSON.
        #[arg(long)]
        markdown: bool,
    },
    /// Print the latest and previous stored scans for a URL.
    History { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { url, markdown } => analyze::run(&url, markdown).await,
        Commands::Compare {
            url_a,
            url_b,
            markdown,
        } => compare::run(&url_a, &url_b, markdown).await,
        Commands::History { url } => history::run(&url).await,
    }
}
