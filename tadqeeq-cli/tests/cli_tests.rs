//! Integration tests for the tadqeeq command line
//!
//! Tests cover:
//! - Argument parsing
//! - Each subcommand's output
//! - Configuration and word-list loading

use std::io::{Cursor, Write};

use clap::Parser;
use tadqeeq_cli::{build_corrector, run, Cli, Commands};

fn run_args(args: &[&str], stdin: &str) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    run(&cli, &mut Cursor::new(stdin.as_bytes().to_vec()))
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_correct_with_global_flags() {
    let cli = Cli::try_parse_from([
        "tadqeeq",
        "correct",
        "هاذا",
        "--highlight",
        "--config",
        "tadqeeq.json",
    ])
    .unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("tadqeeq.json")));
    match cli.command {
        Commands::Correct { text, highlight } => {
            assert_eq!(text.as_deref(), Some("هاذا"));
            assert!(highlight);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_suggest_requires_word() {
    assert!(Cli::try_parse_from(["tadqeeq", "suggest"]).is_err());
}

// ============================================================================
// Subcommands
// ============================================================================

#[test]
fn test_correct_prints_json_result() {
    let output = run_args(&["tadqeeq", "correct", "هاذا الكتاب"], "").unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["corrected_text"], "هذا الكتاب");
    assert_eq!(value["corrections"][0]["kind"], "dictionary_match");
    assert_eq!(value["statistics"]["accuracy"], 50.0);
}

#[test]
fn test_correct_reads_stdin() {
    let output = run_args(&["tadqeeq", "correct"], "مدرسه").unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["corrected_text"], "مدرسة");
}

#[test]
fn test_correct_highlight() {
    let output = run_args(&["tadqeeq", "correct", "--highlight", "هاذا"], "").unwrap();
    assert_eq!(
        output,
        "<mark class=\"error\">هاذا</mark>\n<mark class=\"correction\">هذا</mark>"
    );
}

#[test]
fn test_suggest_prints_advice() {
    let output = run_args(&["tadqeeq", "suggest", "هاذا"], "").unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["correction"], "هذا");
    assert_eq!(value["known"], false);
}

#[test]
fn test_stats_reports_frequencies() {
    let output = run_args(&["tadqeeq", "stats", "--top", "1"], "كتاب قلم كتاب.").unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["statistics"]["words"], 3);
    assert_eq!(value["frequencies"].as_array().unwrap().len(), 1);
    assert_eq!(value["frequencies"][0]["word"], "كتاب");
    assert_eq!(value["frequencies"][0]["count"], 2);
}

#[test]
fn test_diff_highlights_deletion() {
    let output = run_args(&["tadqeeq", "diff", "أ ب ج", "أ ج"], "").unwrap();
    assert_eq!(output, "أ <mark class=\"deleted\">ب</mark> ج\nأ ج");
}

// ============================================================================
// Configuration and word lists
// ============================================================================

#[test]
fn test_word_list_feeds_similarity() {
    let mut words = tempfile::NamedTempFile::new().unwrap();
    writeln!(words, "# hospital words\nمستشفى").unwrap();

    let corrector = build_corrector(None, Some(words.path())).unwrap();
    let result = corrector.correct_text("مستشفا").unwrap();
    assert_eq!(result.corrected_text, "مستشفى");
}

#[test]
fn test_config_extra_corrections() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, r#"{{"extra_corrections": {{"انشاء": "إنشاء"}}}}"#).unwrap();

    let path = config.path().to_str().unwrap();
    let output = run_args(&["tadqeeq", "correct", "انشاء", "--config", path], "").unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["corrected_text"], "إنشاء");
}

#[test]
fn test_invalid_config_is_an_error() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, r#"{{"auto_correct_threshold": 2.0}}"#).unwrap();
    assert!(build_corrector(Some(config.path()), None).is_err());
}

#[test]
fn test_missing_word_list_is_an_error() {
    let missing = std::path::Path::new("/nonexistent/words.txt");
    assert!(build_corrector(None, Some(missing)).is_err());
}
