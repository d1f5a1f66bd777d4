use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use docsearch_core::ranker::clamp_top_k;
use docsearch_core::tokenizer::Analyzer;
use docsearch_core::{BenchmarkReport, Document, IdfScheme, Metrics, SearchEngine, SearchOutcome, VectorizerConfig};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Search the built-in drug and disease corpus and score rankings against relevance judgments", long_about = None)]
struct Cli {
    #[command(flatten)]
    model: ModelArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ModelArgs {
    /// IDF scheme: smooth, plain or smooth-plain
    #[arg(long, global = true, default_value_t = IdfScheme::Smooth)]
    idf: IdfScheme,
    /// Use 1 + ln(tf) instead of raw term counts
    #[arg(long, global = true, default_value_t = false)]
    sublinear_tf: bool,
    /// Apply English stemming to documents and queries
    #[arg(long, global = true, default_value_t = false)]
    stem: bool,
}

impl ModelArgs {
    fn config(&self) -> VectorizerConfig {
        VectorizerConfig { analyzer: Analyzer::new(self.stem), idf: self.idf, sublinear_tf: self.sublinear_tf }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents for a query; prints metrics when the query is judged
    Search {
        #[arg(long, short)]
        query: String,
        /// Number of results (clamped to the corpus size)
        #[arg(long, short, default_value_t = 5, allow_negative_numbers = true)]
        k: i64,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Evaluate every judged query and report mean metrics
    Eval {
        #[arg(long, short, default_value_t = 5, allow_negative_numbers = true)]
        k: i64,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the corpus documents with their ids
    Corpus {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct CorpusListing<'a> {
    documents: &'a [Document],
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let engine = SearchEngine::with_config(cli.model.config());

    match cli.command {
        Commands::Search { query, k, json } => {
            let k = clamp_top_k(k, engine.corpus().len());
            let outcome = engine.search_and_evaluate(&query, k);
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
        }
        Commands::Eval { k, json } => {
            let k = clamp_top_k(k, engine.corpus().len());
            let report = engine.benchmark(k);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Corpus { json } => {
            let documents = engine.corpus().documents();
            if json {
                println!("{}", serde_json::to_string_pretty(&CorpusListing { documents })?);
            } else {
                for d in documents {
                    println!("{:>3}  {}", d.doc_id, d.text);
                }
            }
        }
    }
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome) {
    if outcome.results.is_empty() {
        println!("No results for '{}'.", outcome.query);
    } else {
        println!("{:>4}  {:>6}  {:>8}  text", "rank", "doc_id", "score");
        for (rank, hit) in outcome.results.iter().enumerate() {
            println!("{:>4}  {:>6}  {:>8.4}  {}", rank + 1, hit.doc_id, hit.score, hit.text);
        }
    }
    println!();
    match &outcome.evaluation {
        Some(m) => print_metrics(&format!("Evaluation for '{}'", outcome.query), m),
        None => println!("No relevance judgments for '{}'; not evaluable.", outcome.query),
    }
}

fn print_report(report: &BenchmarkReport) {
    for q in &report.queries {
        print_metrics(&format!("'{}'", q.query), &q.metrics);
    }
    print_metrics(&format!("Mean over {} queries", report.queries.len()), &report.mean);
}

fn print_metrics(title: &str, m: &Metrics) {
    println!("{title} (k={})", m.k);
    println!("  Precision@{}: {:.2}", m.k, m.precision_at_k);
    println!("  Recall@{}:    {:.2}", m.k, m.recall_at_k);
    println!("  MRR:          {:.2}", m.mrr);
    println!("  MAP:          {:.2}", m.map);
}
