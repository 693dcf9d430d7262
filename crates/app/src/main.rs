use chrono::Utc;
use clap::{Parser, Subcommand};
use pdf_qa_core::{
    expand_inputs, resolve_words_per_chunk, Answer, AnswerEndpointConfig, AnswerOrigin,
    IngestionOptions, ProcessingSummary, RemoteAnswerClient, SearchError, StudyCoordinator,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const PREVIEW_CHARS: usize = 120;

type Coordinator = StudyCoordinator<RemoteAnswerClient>;

#[derive(Parser)]
#[command(name = "pdf-qa", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Words per chunk; missing or non-positive values fall back to 400.
    #[arg(long, env = "PDF_QA_CHUNK_SIZE")]
    chunk_size: Option<String>,

    /// Answer service endpoint receiving `{question, contexts}` JSON.
    #[arg(long, env = "PDF_QA_ANSWER_ENDPOINT")]
    answer_endpoint: Option<String>,

    /// Bearer token for the answer service.
    #[arg(long, env = "PDF_QA_ANSWER_API_KEY")]
    answer_api_key: Option<String>,

    /// Request timeout for the answer service, in seconds.
    #[arg(long)]
    answer_timeout_secs: Option<u64>,

    /// Number of ranked chunks to retrieve.
    #[arg(long, default_value = "6")]
    top_k: usize,

    /// Print results as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Extract and index documents, then list the chunks.
    Index {
        /// PDF or text files, or folders searched recursively.
        #[arg(long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,
    },
    /// Index documents and answer one question.
    Ask {
        /// PDF or text files, or folders searched recursively.
        #[arg(long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,
        /// Question to answer.
        #[arg(long)]
        question: String,
    },
    /// Index documents, then answer questions read from stdin.
    Session {
        /// PDF or text files, or folders searched recursively.
        #[arg(long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let options = IngestionOptions {
        words_per_chunk: resolve_words_per_chunk(cli.chunk_size.as_deref()),
        ..IngestionOptions::default()
    };

    let answer_client = AnswerEndpointConfig::from_parts(
        cli.answer_endpoint.as_deref(),
        cli.answer_api_key.as_deref(),
        cli.answer_timeout_secs.map(Duration::from_secs),
    )
    .map(|config| RemoteAnswerClient::new(&config))
    .transpose()?;

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        words_per_chunk = options.words_per_chunk,
        answer_endpoint = answer_client.as_ref().map(|client| client.endpoint().as_str()),
        "pdf-qa boot"
    );

    let coordinator = Coordinator::new(options, answer_client).with_top_k(cli.top_k);

    match cli.command {
        Command::Index { input } => {
            let summary = process(&coordinator, &input)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary.stats)?);
            } else {
                print_stats(&summary);
                for chunk in &coordinator.snapshot().index.chunks {
                    println!(
                        "{} page {} — {}",
                        chunk.source_name,
                        chunk.page_number,
                        preview(&chunk.text)
                    );
                }
            }
        }
        Command::Ask { input, question } => {
            let summary = process(&coordinator, &input)?;
            if !cli.json {
                print_stats(&summary);
            }
            let answer = coordinator.answer_question(&question).await?;
            print_answer(&answer, cli.json)?;
        }
        Command::Session { input } => {
            let summary = process(&coordinator, &input)?;
            print_stats(&summary);
            run_session(&coordinator, cli.json).await?;
        }
    }

    Ok(())
}

fn process(coordinator: &Coordinator, input: &[PathBuf]) -> anyhow::Result<ProcessingSummary> {
    let paths = expand_inputs(input);
    let summary = coordinator.process_documents(&paths)?;

    if !summary.skipped_files.is_empty() {
        warn!("skipped_files={}", summary.skipped_files.len());
        for skipped in &summary.skipped_files {
            warn!(path = %skipped.path.display(), reason = %skipped.reason, "skipped document");
        }
    }

    Ok(summary)
}

async fn run_session(coordinator: &Coordinator, json: bool) -> anyhow::Result<()> {
    println!("ask a question, or :stats, :clear, :quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":clear" => {
                coordinator.clear();
                println!("Cleared.");
            }
            ":stats" => {
                let stats = coordinator.stats();
                println!(
                    "{} doc(s), {} chunk(s), vocab {}.",
                    stats.documents, stats.chunks, stats.vocabulary
                );
            }
            question => match coordinator.answer_question(question).await {
                Ok(answer) => print_answer(&answer, json)?,
                Err(SearchError::EmptyQuery) => println!("Enter a question."),
                Err(SearchError::IndexNotBuilt) => println!("Build the index first."),
            },
        }
    }

    Ok(())
}

fn print_stats(summary: &ProcessingSummary) {
    let stats = summary.stats;
    println!(
        "{} doc(s), {} chunk(s), vocab {}.",
        stats.documents, stats.chunks, stats.vocabulary
    );
}

fn print_answer(answer: &Answer, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(answer)?);
        return Ok(());
    }

    for (rank, hit) in answer.hits.iter().enumerate() {
        println!(
            "Rank {} — {} page {} ({:.3})",
            rank + 1,
            hit.source_name,
            hit.page_number,
            hit.score
        );
        println!("  {}", hit.text);
    }

    match (&answer.origin, &answer.fallback_reason) {
        (AnswerOrigin::Extractive, Some(reason)) => {
            println!("answer service error ({reason}), showing extractive summary:");
        }
        (AnswerOrigin::Extractive, None) => println!("extractive summary:"),
        (AnswerOrigin::Remote, _) => println!("answer:"),
    }
    println!("{}", answer.text);
    Ok(())
}

fn preview(text: &str) -> String {
    let mut shortened: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        shortened.push_str("...");
    }
    shortened
}
