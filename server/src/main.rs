use anyhow::Result;
use axum::Router;
use clap::Parser;
use docsearch_core::tokenizer::Analyzer;
use docsearch_core::{IdfScheme, SearchEngine, VectorizerConfig};
use docsearch_server::build_app;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// IDF scheme: smooth, plain or smooth-plain
    #[arg(long, default_value_t = IdfScheme::Smooth)]
    idf: IdfScheme,
    /// Use 1 + ln(tf) instead of raw term counts
    #[arg(long, default_value_t = false)]
    sublinear_tf: bool,
    /// Apply English stemming to documents and queries
    #[arg(long, default_value_t = false)]
    stem: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = VectorizerConfig { analyzer: Analyzer::new(args.stem), idf: args.idf, sublinear_tf: args.sublinear_tf };
    let engine = Arc::new(SearchEngine::with_config(config));
    // Build the model before accepting traffic.
    let vocabulary = engine.weighting_model().model.vocabulary_size();
    tracing::info!(num_docs = engine.corpus().len(), vocabulary, "model ready");
    let app: Router = build_app(engine);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
