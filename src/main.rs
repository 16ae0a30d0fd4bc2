//! # Assay CLI Application
//!
//! Command-line interface for building and testing knowledge-base
//! assistants.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - Subcommands for the end-to-end workflow:
//!   - `crawl`: Scrape a website into a raw text knowledge base
//!   - `format`: Reformat crawled content into clean Markdown
//!   - `qa`: Generate question-answer pairs from a knowledge base
//!   - `evaluate`: Run an assistant test session and grade its answers
//!
//! ## Features
//!
//! - Configurable crawling with depth controls
//! - Token-bounded chunking for all LLM-backed steps
//! - Progress feedback for long-running operations
//! - Markdown evaluation reports

mod telemetry;

use anyhow::Context;
use assay::crawler::{CrawlerConfig, Crawler, crawl_site};
use assay::evaluator::{Evaluator, render_report};
use assay::kb::{KnowledgeBaseFormatter, QaGenerator, load_qa_pairs, save_qa_pairs};
use assay::llm::Client;
use assay::processor::ChunkOptions;
use assay::session::TestSession;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::instrument;

#[derive(Parser)]
#[command(author, version, about = "Build and test knowledge-base assistants", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a website and save the extracted content
    Crawl(CrawlArgs),

    /// Format crawled content into a Markdown knowledge base
    Format(FormatArgs),

    /// Generate question-answer pairs from a knowledge base
    Qa(QaArgs),

    /// Run a test session over a QA set and grade the answers
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// URL to crawl
    #[arg(required = true)]
    url: String,

    /// Verbose per-page logging
    #[arg(long)]
    cli: bool,

    /// File to write the scraped content to
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Crawl without a depth bound (dedup is the only brake)
    #[arg(long)]
    unlimited: bool,

    /// Maximum crawl depth
    #[arg(short, long, default_value = "3")]
    max_depth: u32,
}

#[derive(Args, Debug)]
struct FormatArgs {
    /// Source to format (URL or file)
    #[arg(required = true)]
    source: String,

    /// File to write the formatted knowledge base to
    #[arg(short, long, default_value = "knowledge_base.md")]
    output: PathBuf,

    /// Model used for formatting
    #[arg(short, long, default_value = "gpt-4o")]
    model: String,

    /// Token budget per chunk
    #[arg(short, long, default_value = "1000")]
    chunk_tokens: usize,

    /// Maximum crawl depth when the source is a URL
    #[arg(short = 'd', long, default_value = "2")]
    max_depth: u32,
}

#[derive(Args, Debug)]
struct QaArgs {
    /// Knowledge base file to generate pairs from
    #[arg(required = true)]
    kb_file: PathBuf,

    /// Number of pairs to request per chunk
    #[arg(short, long, default_value = "10")]
    pairs: usize,

    /// File to write the QA set to
    #[arg(short, long, default_value = "qa_set.json")]
    output: PathBuf,

    /// Model used for generation
    #[arg(short, long, default_value = "gpt-4o")]
    model: String,

    /// Token budget per chunk
    #[arg(short, long, default_value = "1000")]
    chunk_tokens: usize,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// QA set file to test against
    #[arg(required = true)]
    qa_file: PathBuf,

    /// Knowledge base file to ground the assistant with
    #[arg(short, long)]
    kb: Option<PathBuf>,

    /// Model used for both the session and the grading
    #[arg(short, long, default_value = "gpt-4o-mini")]
    model: String,

    /// File to write the Markdown report to
    #[arg(short, long, default_value = "evaluation_report.md")]
    report: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Some(Commands::Crawl(args)) if args.cli);
    telemetry::init_tracing_subscriber(verbose);

    match cli.command {
        Some(Commands::Crawl(args)) => {
            crawl_command(args).await?;
        }
        Some(Commands::Format(args)) => {
            format_command(args).await?;
        }
        Some(Commands::Qa(args)) => {
            qa_command(args).await?;
        }
        Some(Commands::Evaluate(args)) => {
            evaluate_command(args).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["--help"]);
        }
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::default_spinner());
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

#[instrument]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    println!("Crawling {}...", args.url);

    let domain = url::Url::parse(&args.url)
        .ok()
        .and_then(|u| u.host_str().map(String::from))
        .with_context(|| format!("cannot derive a domain from {}", args.url))?;

    let config = CrawlerConfig::builder()
        .domain(domain)
        .max_depth(args.max_depth)
        .unlimited(args.unlimited)
        .output(args.output.clone())
        .build();

    // With an output path set, pages stream to disk instead of
    // accumulating in memory.
    let crawler = Crawler::new(config)?;
    crawler.crawl(&args.url).await?;

    println!("Saved crawled content to {}", args.output.display());

    Ok(())
}

#[instrument]
async fn format_command(args: FormatArgs) -> anyhow::Result<()> {
    let raw_text = if args.source.starts_with("http") {
        println!("Crawling {}...", args.source);
        let state = crawl_site(&args.source, args.max_depth).await?;
        println!("Crawled {} pages", state.len());
        state.aggregate_text()
    } else {
        println!("Loading from file {}...", args.source);
        tokio::fs::read_to_string(&args.source)
            .await
            .with_context(|| format!("failed to read {}", args.source))?
    };

    let client = Client::from_env()?;
    let options = ChunkOptions {
        max_tokens: args.chunk_tokens,
        model: args.model.clone(),
    };
    let mut formatter = KnowledgeBaseFormatter::new(client, &options)?;

    let bar = spinner("Formatting knowledge base...");
    let formatted = formatter.format_knowledge_base(&raw_text).await?;
    bar.finish_and_clear();

    formatter.save_to_file(&formatted, &args.output).await?;
    println!("Saved knowledge base to {}", args.output.display());

    Ok(())
}

#[instrument]
async fn qa_command(args: QaArgs) -> anyhow::Result<()> {
    let knowledge_base = tokio::fs::read_to_string(&args.kb_file)
        .await
        .with_context(|| format!("failed to read {}", args.kb_file.display()))?;

    let client = Client::from_env()?;
    let options = ChunkOptions {
        max_tokens: args.chunk_tokens,
        model: args.model.clone(),
    };
    let generator = QaGenerator::new(client, &options, args.pairs)?;

    let bar = spinner("Generating question-answer pairs...");
    let generation = generator.generate(&knowledge_base).await?;
    bar.finish_and_clear();

    for failure in &generation.failures {
        eprintln!(
            "Warning: chunk {} produced an unparseable response: {}",
            failure.chunk, failure.error
        );
    }

    save_qa_pairs(&args.output, &generation.set).await?;
    println!(
        "Saved {} QA pairs to {}",
        generation.set.qas.len(),
        args.output.display()
    );

    Ok(())
}

#[instrument]
async fn evaluate_command(args: EvaluateArgs) -> anyhow::Result<()> {
    let qa_set = load_qa_pairs(&args.qa_file).await?;
    println!("Loaded {} QA pairs", qa_set.qas.len());

    let knowledge_base = match &args.kb {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let client = Client::from_env()?;
    let session = TestSession::new(client.clone(), &args.model, knowledge_base.as_deref());

    let bar = spinner("Running test session...");
    let answers = session.run(&qa_set).await?;
    bar.finish_and_clear();

    let evaluator = Evaluator::new(client, &args.model);
    let bar = spinner("Grading answers...");
    let rows = evaluator.evaluate(&qa_set, &answers).await?;
    bar.finish_and_clear();

    let report = render_report(&rows);
    tokio::fs::write(&args.report, &report).await?;
    println!("Markdown report written to {}", args.report.display());

    Ok(())
}
