//! Regional Reels main entry point
//!
//! This is the command-line interface for the Regional Reels movie catalog
//! crawler.

use clap::Parser;
use regional_reels::config::{load_config_with_hash, validate, Config};
use regional_reels::crawler::{crawl, plan_queries};
use regional_reels::output::{
    load_cached_catalog, print_ranked, print_statistics, CatalogSink, JsonSink,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Regional Reels: a polite movie catalog crawler
///
/// Regional Reels searches a public movie database for titles associated
/// with a region, deduplicates the results across overlapping searches,
/// ranks them by rating and saves them as a JSON catalog.
#[derive(Parser, Debug)]
#[command(name = "regional-reels")]
#[command(version)]
#[command(about = "A polite regional movie catalog crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of movies to keep
    #[arg(short, long)]
    limit: Option<usize>,

    /// Path of the JSON catalog to write
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Extra search term, may be repeated
    #[arg(short, long = "keyword", value_name = "TERM")]
    keywords: Vec<String>,

    /// Fill gaps in the ranked movies from their detail pages
    #[arg(long, conflicts_with = "cached")]
    enrich: bool,

    /// Use the existing catalog file instead of crawling when it is readable
    #[arg(long)]
    cached: bool,

    /// Validate config and show the planned searches without fetching anything
    #[arg(long, conflicts_with_all = ["cached", "enrich"])]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    if cli.cached {
        let path = Path::new(&config.output.catalog_path);
        if let Some(movies) = load_cached_catalog(path, config.output.limit) {
            print_ranked(&movies, config.output.top_n);
            return Ok(());
        }
    }

    handle_crawl(config, cli.enrich, cli.verbose > 0).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("regional_reels=info,warn"),
            1 => EnvFilter::new("regional_reels=debug,info"),
            2 => EnvFilter::new("regional_reels=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(limit) = cli.limit {
        config.output.limit = limit;
    }
    if let Some(output) = &cli.output {
        config.output.catalog_path = output.display().to_string();
    }
    config.search.keywords.extend(cli.keywords.iter().cloned());

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the searches a crawl would run
fn handle_dry_run(config: &Config) {
    println!("=== Regional Reels Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Accept-Language: {}", config.site.accept_language);
    println!(
        "  Timeouts: {}s request, {}s connect",
        config.site.timeout_secs, config.site.connect_timeout_secs
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nSearch:");
    println!("  Region code: {}", config.search.region_code);
    println!("  Title type: {}", config.search.title_type);
    println!(
        "  Delays: {}ms per card, {}ms per query",
        config.search.item_delay_ms, config.search.query_delay_ms
    );

    let queries = plan_queries(&config.search, config.output.limit);
    println!("\nPlanned Queries ({}):", queries.len());
    for query in &queries {
        println!("  - {:?} (up to {} cards)", query.term, query.cap);
    }

    println!("\nOutput:");
    println!("  Catalog: {}", config.output.catalog_path);
    println!("  Limit: {}", config.output.limit);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    enrich: bool,
    show_stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Region: {}, base queries: {}, keywords: {}",
        config.search.region_code,
        config.search.base_queries.len(),
        config.search.keywords.len()
    );

    let top_n = config.output.top_n;
    let sink = JsonSink::new(&config.output.catalog_path);

    // Run the crawler
    let outcome = match crawl(config, enrich).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_ranked(&outcome.movies, top_n);

    if let Err(e) = sink.write_catalog(&outcome.movies) {
        tracing::error!("Failed to write catalog to {}: {}", sink.destination(), e);
        return Err(e.into());
    }
    println!(
        "\nSaved {} movies to {}",
        outcome.movies.len(),
        sink.destination()
    );

    if show_stats {
        println!();
        print_statistics(&outcome.stats);
    }

    Ok(())
}
