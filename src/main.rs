// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Neonotate: keyword-categorized personal notes
//!
//! Command-line front-end. Without a subcommand it runs the interactive menu.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use neonotate::menu;
use neonotate::{AppConfig, ErrorKind, NeonotateError, NoteStore};

/// Neonotate CLI - keyword-categorized notes
#[derive(Parser, Debug)]
#[command(name = "neonotate")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "1.0.0")]
#[command(about = "Keyword-categorized personal notes", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "neonotate.json", global = true)]
    config: PathBuf,

    /// Data file (overrides config)
    #[arg(short, long, global = true)]
    data_file: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Notes(NoteCommands),

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum NoteCommands {
    /// Register a category with its keywords
    AddCategory {
        /// Category name
        name: String,

        /// Keywords (comma-separated values are split)
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Add a note; its category is chosen automatically
    AddNote {
        /// Note content (words are joined with spaces)
        #[arg(required = true)]
        content: Vec<String>,
    },

    /// List all notes
    View,

    /// Find notes containing a keyword (case-insensitive)
    Search {
        /// Keyword or phrase
        keyword: String,
    },

    /// Export notes to a JSON file
    Export {
        /// Output file (default from config)
        output: Option<PathBuf>,
    },

    /// List categories with keywords and weights
    Categories,

    /// Show store statistics
    Stats,

    /// Show which category a text would get, without storing it
    Categorize {
        /// Text to categorize
        #[arg(required = true)]
        content: Vec<String>,
    },

    /// Run the interactive menu
    Menu,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "neonotate.json")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {:?}", cli.config))?;
    if let Some(ref data_file) = cli.data_file {
        config.data_file = data_file.to_string_lossy().to_string();
    }

    let json = cli.format == "json";

    match cli.command {
        Some(Commands::Config { action }) => run_config_command(config, action, &cli.config),
        Some(Commands::Notes(command)) => run_note_command(&config, command, json),
        None => run_note_command(&config, NoteCommands::Menu, json),
    }
}

/// Open the data file; a broken file only costs a warning
fn open_store(config: &AppConfig) -> NoteStore {
    let mut store = NoteStore::new(&config.data_file, &config.storage);
    if let Err(e) = store.load() {
        warn!("Starting with empty notes: {}", e);
    }
    store
}

/// Run note commands
fn run_note_command(config: &AppConfig, command: NoteCommands, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(config);

    match command {
        NoteCommands::AddCategory { name, keywords } => {
            let keywords = split_keywords(&keywords, config.menu.keyword_separator);
            let stored = report(store.add_category(&name, &keywords))?;
            println!(
                "Category '{}' added successfully with keywords: {}",
                name.trim(),
                stored.join(", ")
            );
        }
        NoteCommands::AddNote { content } => {
            let note = report(store.add_note(&content.join(" ")))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&note)?);
            } else {
                println!("Note added successfully under category '{}'.", note.category);
            }
        }
        NoteCommands::View => match store.view_notes() {
            Ok(notes) => print_notes(notes.iter(), json)?,
            Err(NeonotateError::NoNotes) if json => println!("[]"),
            Err(e) => println!("{}", e),
        },
        NoteCommands::Search { keyword } => {
            let results = report(store.search_notes(&keyword))?;
            if results.is_empty() && !json {
                println!("No notes found containing the keyword '{}'.", keyword.trim());
            } else {
                print_notes(results.into_iter(), json)?;
            }
        }
        NoteCommands::Export { output } => {
            let output = output.unwrap_or_else(|| config.export.default_path());
            let output = output.to_string_lossy();
            let count = report(store.export_notes(&output))?;
            println!("Exported {} notes successfully to '{}'.", count, output.trim());
        }
        NoteCommands::Categories => run_categories(&store, json)?,
        NoteCommands::Stats => {
            let stats = store.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Store Statistics:");
                println!("  Notes: {}", stats.note_count);
                println!("  Categories: {}", stats.category_count);
                println!("  Weighted keywords: {}", stats.weighted_keyword_count);
                for (name, count) in &stats.notes_per_category {
                    println!("  {}: {} notes", name, count);
                }
            }
        }
        NoteCommands::Categorize { content } => {
            let content = content.join(" ");
            let category = store.categorize(&content);
            let scores = store.score(&content);
            if json {
                let output = serde_json::json!({
                    "category": category,
                    "scores": scores,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("Category: {}", category);
                for s in scores {
                    println!("  {} = {}", s.category, s.score);
                }
            }
        }
        NoteCommands::Menu => {
            let stdin = io::stdin();
            menu::run(&mut store, &config.menu, &mut stdin.lock(), &mut io::stdout())?;
        }
    }

    Ok(())
}

/// Print validation errors plainly; pass persistence failures up with context.
fn report<T>(result: neonotate::Result<T>) -> anyhow::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.kind() == ErrorKind::Validation => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
        Err(e) => Err(anyhow::Error::new(e).context("change kept in memory but not saved")),
    }
}

/// Split each argument on the separator so both `a b` and `a,b` work
fn split_keywords(args: &[String], separator: char) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(separator))
        .map(String::from)
        .collect()
}

fn print_notes<'a>(notes: impl Iterator<Item = &'a neonotate::Note>, json: bool) -> anyhow::Result<()> {
    if json {
        let notes: Vec<_> = notes.collect();
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else {
        let mut out = io::stdout().lock();
        for note in notes {
            menu::write_note(&mut out, note)?;
        }
    }
    Ok(())
}

fn run_categories(store: &NoteStore, json: bool) -> anyhow::Result<()> {
    if json {
        let output = serde_json::json!({
            "categories": store.categories(),
            "keyword_weights": store.keyword_weights(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if store.categories().is_empty() {
        println!("No categories defined");
        return Ok(());
    }

    println!("Categories:");
    for category in store.categories() {
        let keywords: Vec<String> = category
            .keywords
            .iter()
            .map(|kw| {
                let weight = store.keyword_weights().get(&kw.to_lowercase()).copied().unwrap_or(0);
                format!("{} ({})", kw, weight)
            })
            .collect();
        println!("  {} - {}", category.name, keywords.join(", "));
    }
    Ok(())
}

/// Run config commands
fn run_config_command(config: AppConfig, action: ConfigCommands, config_path: &Path) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output } => {
            AppConfig::default()
                .save(&output)
                .with_context(|| format!("writing {:?}", output))?;
            info!("Generated config at {:?} (active: {:?})", output, config_path);
            println!("Generated config at {:?}", output);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["neonotate"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_add_category_command() {
        let cli = Cli::try_parse_from([
            "neonotate", "add-category", "Work", "meeting,deadline", "report"
        ]).unwrap();

        match cli.command {
            Some(Commands::Notes(NoteCommands::AddCategory { name, keywords })) => {
                assert_eq!(name, "Work");
                assert_eq!(
                    split_keywords(&keywords, ','),
                    vec!["meeting", "deadline", "report"]
                );
            }
            _ => panic!("Expected AddCategory command"),
        }
    }

    #[test]
    fn test_cli_add_note_command() {
        let cli = Cli::try_parse_from([
            "neonotate", "--data-file", "/tmp/n.json", "add-note", "Schedule", "a", "meeting"
        ]).unwrap();

        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/n.json")));
        match cli.command {
            Some(Commands::Notes(NoteCommands::AddNote { content })) => {
                assert_eq!(content.join(" "), "Schedule a meeting");
            }
            _ => panic!("Expected AddNote command"),
        }
    }

    #[test]
    fn test_cli_export_default_path() {
        let cli = Cli::try_parse_from(["neonotate", "export", "--format", "json"]).unwrap();
        assert_eq!(cli.format, "json");
        match cli.command {
            Some(Commands::Notes(NoteCommands::Export { output })) => assert!(output.is_none()),
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_cli_config_is_not_a_note_command() {
        let cli = Cli::try_parse_from(["neonotate", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config { action: ConfigCommands::Show })
        ));
    }

    #[test]
    fn test_config_generate_leaves_data_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("notes.json");
        let output = dir.path().join("generated.json");

        let cli = Cli::try_parse_from([
            "neonotate".to_string(),
            "--config".to_string(),
            dir.path().join("absent.json").to_string_lossy().to_string(),
            "--data-file".to_string(),
            data_file.to_string_lossy().to_string(),
            "config".to_string(),
            "generate".to_string(),
            "--output".to_string(),
            output.to_string_lossy().to_string(),
        ]).unwrap();

        run(cli).unwrap();
        assert!(output.exists());
        assert!(!data_file.exists());
    }

    #[test]
    fn test_note_command_round_trip_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.data_file = dir.path().join("notes.json").to_string_lossy().to_string();

        run_note_command(
            &config,
            NoteCommands::AddCategory {
                name: "Work".into(),
                keywords: vec!["meeting,deadline".into()],
            },
            false,
        ).unwrap();
        run_note_command(
            &config,
            NoteCommands::AddNote { content: vec!["team".into(), "meeting".into()] },
            false,
        ).unwrap();

        let store = open_store(&config);
        assert_eq!(store.notes()[0].category, "Work");
        assert_eq!(store.keyword_weights().get("meeting"), Some(&1));
    }
}
