//! Command-line front end for the tadqeeq correction engine.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tadqeeq_core::{highlight_differences, Corrector, CorrectorConfig};
use tadqeeq_store::MemoryWordStore;
use tadqeeq_text::{text_statistics, word_frequencies, TextStatistics};

#[derive(Parser, Debug)]
#[command(name = "tadqeeq", about = "Arabic spelling correction")]
pub struct Cli {
    /// Corrector configuration file (JSON)
    #[arg(long, global = true, env = "TADQEEQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Newline-separated custom words to load into the word store
    #[arg(long, global = true, env = "TADQEEQ_WORDS")]
    pub words: Option<PathBuf>,

    /// Emit logs as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Correct a text (read from stdin when omitted)
    Correct {
        text: Option<String>,
        /// Print the highlighted renderings instead of the full result
        #[arg(long)]
        highlight: bool,
    },
    /// Show what the engine knows about one word
    Suggest { word: String },
    /// Descriptive statistics and word frequencies of a text
    Stats {
        text: Option<String>,
        /// Number of most frequent words to report
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Highlight the differences between two texts
    Diff { original: String, corrected: String },
}

#[derive(Debug, Serialize)]
struct WordCount {
    word: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    statistics: TextStatistics,
    frequencies: Vec<WordCount>,
}

pub fn init_observability(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tadqeeq_core=debug".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .init();
    }
}

pub fn build_corrector(config: Option<&Path>, words: Option<&Path>) -> anyhow::Result<Corrector> {
    let config = match config {
        Some(path) => CorrectorConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CorrectorConfig::default(),
    };
    let mut corrector = Corrector::new(config)?;

    if let Some(path) = words {
        let file = File::open(path)
            .with_context(|| format!("failed to open word list {}", path.display()))?;
        let store = MemoryWordStore::from_word_list(BufReader::new(file))?;
        info!(words = store.len()?, path = %path.display(), "custom words loaded");
        corrector = corrector.with_store(Arc::new(store));
    }

    Ok(corrector)
}

fn text_or_stdin(text: &Option<String>, stdin: &mut impl Read) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text.clone()),
        None => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf).context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Execute the parsed command and return what should be printed.
pub fn run(cli: &Cli, stdin: &mut impl Read) -> anyhow::Result<String> {
    let corrector = || build_corrector(cli.config.as_deref(), cli.words.as_deref());

    match &cli.command {
        Commands::Correct { text, highlight } => {
            let text = text_or_stdin(text, stdin)?;
            let result = corrector()?.correct_text(&text)?;
            if *highlight {
                Ok(format!(
                    "{}\n{}",
                    result.highlighted.original, result.highlighted.corrected
                ))
            } else {
                Ok(serde_json::to_string_pretty(&result)?)
            }
        }
        Commands::Suggest { word } => {
            let advice = corrector()?.suggest_word(word)?;
            Ok(serde_json::to_string_pretty(&advice)?)
        }
        Commands::Stats { text, top } => {
            let text = text_or_stdin(text, stdin)?;
            let report = StatsReport {
                statistics: text_statistics(&text),
                frequencies: word_frequencies(&text)
                    .into_iter()
                    .take(*top)
                    .map(|(word, count)| WordCount { word, count })
                    .collect(),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        Commands::Diff {
            original,
            corrected,
        } => {
            let highlighted = highlight_differences(original, corrected);
            Ok(format!("{}\n{}", highlighted.original, highlighted.corrected))
        }
    }
}
