use clap::{Parser, Subcommand};
use newslens_analysis::Analyzer;
use newslens_core::{AppConfig, SortMode};
use newslens_search::{Aggregator, SearchError, SearchQuery};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newslens")]
#[command(about = "Search news and analyze articles from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print reachable articles matching a keyword query as JSON
    Fetch {
        query: String,
        /// relevancy, popularity or publishedAt
        #[arg(long, default_value = "relevancy")]
        sort_by: SortMode,
        /// Defaults to NEWS_DEFAULT_PAGE_SIZE
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Summarize one article and classify its sentiment
    Analyze { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = newslens_core::load_app_config()?;

    // Logs go to stderr so stdout stays valid JSON.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Fetch {
            query,
            sort_by,
            page_size,
        } => run_fetch(&config, &query, sort_by, page_size).await,
        Commands::Analyze { url } => run_analyze(&config, &url).await,
    }
}

/// Apply the configured default page size and validate against the overfetch size.
fn fetch_query(
    keywords: &str,
    sort_by: SortMode,
    page_size: Option<usize>,
    default_page_size: usize,
    overfetch_size: usize,
) -> Result<SearchQuery, SearchError> {
    SearchQuery::new(
        keywords,
        sort_by,
        page_size.unwrap_or(default_page_size),
        overfetch_size,
    )
}

async fn run_fetch(
    config: &AppConfig,
    keywords: &str,
    sort_by: SortMode,
    page_size: Option<usize>,
) -> anyhow::Result<()> {
    let query = fetch_query(
        keywords,
        sort_by,
        page_size,
        config.news_default_page_size,
        config.news_overfetch_size,
    )?;
    tracing::info!(
        query = %keywords,
        sort_by = ?sort_by,
        page_size = query.page_size,
        provider = ?config.news_provider,
        "fetching news"
    );

    let aggregator = Aggregator::from_config(config)?;
    let articles = aggregator.aggregate(&query).await?;
    tracing::info!(returned = articles.len(), "fetch complete");

    println!("{}", serde_json::to_string_pretty(&articles)?);
    Ok(())
}

async fn run_analyze(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    tracing::info!(url = %url, max_words = config.max_words, "analyzing article");
    let analyzer = Analyzer::from_config(config)?;
    let result = analyzer.analyze(url).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
