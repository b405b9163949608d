mod ai;
mod config;
mod error;
mod feed;
mod models;
mod server;
mod services;

use anyhow::Context;

use ai::PostGenerator;
use config::Config;
use error::Result;
use feed::NewsFetcher;
use models::GenerationRequest;
use server::{create_app, AppState};
use services::{Catalog, ContentFetcher};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (info and above unless RUST_LOG says otherwise)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Load configuration
    let config = Config::load()?;

    let completion = ai::completion_from_config(&config)?;
    let generator = PostGenerator::new(completion, config.completion_timeout());
    match generator.provider() {
        Some(name) => tracing::info!("Using {} for content generation", name),
        None => tracing::warn!("No API key configured, all content will use templates"),
    }

    let state = AppState {
        generator,
        news: NewsFetcher::new(config.news_feeds.clone(), config.fetch_timeout())?,
        content: ContentFetcher::new(config.fetch_timeout())?,
        catalog: Catalog::default(),
    };

    // Check for --draft flag (headless generation)
    if args.len() >= 4 && args[1] == "--draft" {
        let request = GenerationRequest::new(args[2].clone(), args[3].clone());
        let draft = state.generator.draft(&request).await?;
        if draft.is_fallback() {
            eprintln!("Some sections use template content");
        }
        println!("{}", draft.value.final_text());
        return Ok(());
    }

    // Check for --news flag (headless headlines)
    if args.len() >= 2 && args[1] == "--news" {
        for article in state.news.latest().await {
            println!("{} ({})\n  {}", article.title, article.source.name, article.url);
        }
        return Ok(());
    }

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
