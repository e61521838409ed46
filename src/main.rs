mod cli;
mod config;
mod error;
mod models;
mod services;

use clap::Parser;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

use cli::Cli;
use config::Config;
use error::Result;
use models::{AnalysisReport, StylesheetSource};
use services::extractor::group_by_breakpoint;
use services::filter::filter_records;
use services::{
    BrowserSession, CacheService, ComplexityService, ExtractorService, MarkdownService,
    StorageService,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("media-query-analyzer: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args, config).await {
        eprintln!("media-query-analyzer: {}", err);
        std::process::exit(1);
    }
}

async fn run(args: Cli, config: Config) -> Result<()> {
    let cache = CacheService::new(config.cache_dir.clone(), config.cache_ttl);
    let storage = StorageService::new(&config);

    let cache_key =
        CacheService::cache_key(&args.url, args.property.as_deref(), args.selector.as_deref());

    let mut cached = false;
    let report = if args.force {
        None
    } else {
        cache.get(&cache_key).await.inspect(|_| cached = true)
    };

    let report = match report {
        Some(report) => {
            info!("Using cached analysis for {}", args.url);
            report
        }
        None => {
            let report = analyze(&args, &config).await?;
            cache.put(&cache_key, &report).await;
            report
        }
    };

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| storage.default_output_path(&args.url));
    storage.write_report(&output_path, &report).await?;

    let markdown_path = output_path.with_extension("md");
    let markdown = MarkdownService::new().render(&args.url, &report);
    storage.write_markdown(&markdown_path, &markdown).await?;

    print_report(&args.url, &report, &output_path, cached);
    Ok(())
}

async fn analyze(args: &Cli, config: &Config) -> Result<AnalysisReport> {
    info!("Analyzing {}", args.url);

    let session = BrowserSession::launch(config.clone()).await?;
    let snapshot = navigate_and_snapshot(&session, args).await;
    session.close().await;
    let sheets = snapshot?;

    let extraction = ExtractorService::new().extract(&sheets);
    info!(
        "Extracted {} media queries from {} stylesheets",
        extraction.summary.total_media_queries,
        sheets.len()
    );

    // Complexity always reflects the full extraction, not the filtered view.
    let complexity = ComplexityService::new().score(&extraction.media_queries);

    let media_queries = if args.property.is_some() || args.selector.is_some() {
        filter_records(
            &extraction.media_queries,
            args.property.as_deref(),
            args.selector.as_deref(),
        )
    } else {
        extraction.media_queries
    };
    let breakpoints = group_by_breakpoint(&media_queries);

    Ok(AnalysisReport {
        summary: extraction.summary,
        media_queries,
        breakpoints,
        complexity,
    })
}

async fn navigate_and_snapshot(
    session: &BrowserSession,
    args: &Cli,
) -> Result<Vec<StylesheetSource>> {
    let page = session.navigate(args.url.as_str(), args.timeout).await?;
    session.snapshot_stylesheets(&page).await
}

fn print_report(url: &Url, report: &AnalysisReport, output_path: &Path, cached: bool) {
    println!("Media query analysis for {}", url);
    if cached {
        println!("(served from cache)");
    }
    println!();

    let breakpoints = report
        .summary
        .unique_breakpoints
        .iter()
        .map(|v| format!("{}px", v))
        .collect::<Vec<_>>()
        .join(", ");
    println!("  Media queries: {}", report.summary.total_media_queries);
    println!(
        "  Breakpoints:   {}",
        if breakpoints.is_empty() {
            "none".to_string()
        } else {
            breakpoints
        }
    );

    let complexity = &report.complexity;
    println!(
        "  Complexity:    {}/100 ({})",
        complexity.score, complexity.level
    );
    println!("  {}", complexity.recommendation);

    for problem in &complexity.problem_breakpoints {
        println!("  ! {}: {}", problem.breakpoint, problem.reason);
    }

    println!();
    println!("Report written to {}", output_path.display());
    println!(
        "Markdown written to {}",
        output_path.with_extension("md").display()
    );
}
