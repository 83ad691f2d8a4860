use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{
    DEFAULT_INPUT, DEFAULT_MAX_BYTES, DEFAULT_MAX_RECORDS, DEFAULT_OUT_DIR, PartitionLimits,
    SplitConfig,
};
use crate::splitter::{SplitReport, list_part_files, split_conversations};
use crate::utils::{format_megabytes, parse_size, sanitize_for_terminal};
use crate::viewer::{
    MESSAGES_CSV_CANDIDATES, autodetect_messages_csv, collect_conversation, find_conversations,
    read_messages, render_html,
};

#[derive(Parser)]
#[command(name = "conversation-splitter")]
#[command(version = "0.1.0")]
#[command(about = "Split a ChatGPT conversations export into bounded part files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split conversations.json into part files plus index.csv
    Split {
        /// Export file holding one JSON array of conversations
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Directory for part files and CSV outputs
        #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,

        /// Maximum conversations per part file
        #[arg(long, default_value_t = DEFAULT_MAX_RECORDS)]
        max_convs: usize,

        /// Maximum bytes per part file, e.g. 50MB, 512k, 1g
        #[arg(long, default_value = DEFAULT_MAX_BYTES, value_parser = parse_size_arg)]
        max_bytes: u64,

        /// Also write messages.csv with one row per user/assistant message
        #[arg(long)]
        csv: bool,

        /// Log every conversation as it is placed
        #[arg(long)]
        verbose: bool,
    },

    /// List conversations whose id or title contains QUERY
    Find {
        /// messages.csv to search; autodetected when omitted
        #[arg(short, long)]
        messages: Option<PathBuf>,

        /// Case-insensitive text to look for
        query: String,

        /// Maximum number of conversations to list
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Write one conversation from messages.csv as a standalone HTML page
    Export {
        /// messages.csv to read; autodetected when omitted
        #[arg(short, long)]
        messages: Option<PathBuf>,

        /// Conversation id to export
        id: String,

        /// HTML file to write
        #[arg(short, long, default_value = "chat_view.html")]
        output: PathBuf,
    },
}

fn parse_size_arg(value: &str) -> std::result::Result<u64, String> {
    parse_size(value).map_err(|e| e.to_string())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Split { input, out_dir, max_convs, max_bytes, csv, verbose }) => {
            init_logging(verbose);
            let config = SplitConfig {
                input,
                out_dir,
                limits: PartitionLimits { max_records: max_convs, max_bytes },
                emit_messages_csv: csv,
            };
            run_split(&config)?;
        }
        Some(Commands::Find { messages, query, limit }) => {
            init_logging(false);
            run_find(messages, &query, limit)?;
        }
        Some(Commands::Export { messages, id, output }) => {
            init_logging(false);
            run_export(messages, &id, &output)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Installs the stderr subscriber; `RUST_LOG` wins over `verbose`
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "warn,conversation_splitter=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed when embedded; keep that one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn run_split(config: &SplitConfig) -> Result<()> {
    let report = split_conversations(config)
        .with_context(|| format!("Failed to split {}", config.input.display()))?;
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &SplitReport) {
    println!("Split complete");
    println!("================================");
    println!("Conversations: {}", report.conversations);
    println!("Part files written: {}", report.parts.len());
    if !report.oversized.is_empty() {
        println!("Oversized conversations: {}", report.oversized.len());
        for item in &report.oversized {
            println!("  {} ({}) -> {}", item.id, format_megabytes(item.bytes), item.part_file);
        }
    }
    println!();
    println!("Output directory: {}", report.out_dir.display());
    println!("Index: {}", report.index_path.display());
    if let Some(messages_path) = &report.messages_path {
        println!("Messages: {} ({} rows)", messages_path.display(), report.messages_written);
    }

    let parts = list_part_files(&report.out_dir);
    if !parts.is_empty() {
        println!("Parts:");
        for path in parts {
            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            println!("  {} ({})", name, format_megabytes(size));
        }
    }
}

fn run_find(messages: Option<PathBuf>, query: &str, limit: usize) -> Result<()> {
    let path = resolve_messages_csv(messages)?;
    let rows =
        read_messages(&path).with_context(|| format!("Failed to read {}", path.display()))?;

    let hits = find_conversations(rows, query, limit)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if hits.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    for hit in hits {
        println!(
            "{} — {}",
            sanitize_for_terminal(&hit.conversation_id),
            sanitize_for_terminal(&hit.title)
        );
    }
    Ok(())
}

fn run_export(messages: Option<PathBuf>, id: &str, output: &Path) -> Result<()> {
    let path = resolve_messages_csv(messages)?;
    let rows =
        read_messages(&path).with_context(|| format!("Failed to read {}", path.display()))?;

    let items = collect_conversation(rows, id)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let Some(first) = items.first() else {
        println!("No messages found for this id.");
        return Ok(());
    };

    let html = render_html(&items, &first.title, id);
    fs::write(output, html).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {} ({} messages)", output.display(), items.len());
    Ok(())
}

fn resolve_messages_csv(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("messages.csv not found: {}", path.display());
        }
        return Ok(path);
    }

    match autodetect_messages_csv(Path::new(".")) {
        Some(path) => Ok(path),
        None => bail!(
            "No messages.csv found (looked for {}); run `split --csv` first or pass --messages",
            MESSAGES_CSV_CANDIDATES.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_split_defaults() {
        let cli = Cli::try_parse_from(["conversation-splitter", "split"]).unwrap();
        let Some(Commands::Split { input, out_dir, max_convs, max_bytes, csv, verbose }) =
            cli.command
        else {
            panic!("expected split command");
        };
        assert_eq!(input, PathBuf::from("conversations.json"));
        assert_eq!(out_dir, PathBuf::from("parts"));
        assert_eq!(max_convs, 200);
        assert_eq!(max_bytes, 50 * 1024 * 1024);
        assert!(!csv);
        assert!(!verbose);
    }

    #[test]
    fn test_split_size_parsing() {
        let cli = Cli::try_parse_from(["conversation-splitter", "split", "--max-bytes", "512k"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Split { max_bytes: 524_288, .. })));

        assert!(
            Cli::try_parse_from(["conversation-splitter", "split", "--max-bytes", "lots"]).is_err()
        );
    }

    #[test]
    fn test_find_and_export_arguments() {
        let cli =
            Cli::try_parse_from(["conversation-splitter", "find", "-m", "m.csv", "rust"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Find { ref query, limit: 50, messages: Some(_) }) if query == "rust"
        ));

        let cli = Cli::try_parse_from(["conversation-splitter", "export", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Export { ref id, ref output, messages: None })
                if id == "abc" && output == Path::new("chat_view.html")
        ));
    }

    #[test]
    fn test_resolve_explicit_missing_file() {
        let err = resolve_messages_csv(Some(PathBuf::from("/nonexistent/messages.csv")))
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
