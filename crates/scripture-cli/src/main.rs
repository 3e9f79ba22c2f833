//! Scripture CLI - read, search and annotate Bible translations from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Search verse text in the current translation
//! scr search "in the beginning"
//! scr search light -t asv -n 5 --json
//!
//! # Search the Strong's lexicon
//! scr lookup shepherd --language hebrew
//!
//! # Read and annotate
//! scr read genesis 1
//! scr bookmark genesis 1 3
//! scr highlight jn 3 16
//! scr progress
//! ```

mod config;
mod output;
mod reader;
mod search;
mod storage;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use scripture_core::lexicon::Language;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Scripture reader and search CLI.
///
/// Reading position, bookmarks, highlights and search history are kept in
/// the data directory and survive between runs.
#[derive(Parser)]
#[command(name = "scr", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Custom data directory (default: platform standard location)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Search verse text (case-insensitive substring match)
    Search {
        query: String,

        /// Translation to switch to before searching (kjv, asv, bbe, ...)
        #[arg(short, long)]
        translation: Option<String>,

        /// Maximum number of verses to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Search the Strong's Hebrew and Greek lexicon
    Lookup {
        query: String,

        /// Restrict to one language
        #[arg(long, value_enum)]
        language: Option<LanguageArg>,

        /// Maximum number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Toggle a chapter bookmark, or a verse bookmark when a verse is given
    Bookmark {
        /// Book name, abbreviation or number
        book: String,
        chapter: usize,
        verse: Option<usize>,
    },

    /// Toggle a verse highlight
    Highlight {
        /// Book name, abbreviation or number
        book: String,
        chapter: usize,
        verse: usize,
    },

    /// Print a chapter and mark it read
    Read {
        /// Book name, abbreviation or number
        book: String,
        chapter: usize,
    },

    /// Show reading progress for the current translation
    Progress,
}

#[derive(Clone, Copy, ValueEnum)]
enum LanguageArg {
    Hebrew,
    Greek,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Hebrew => Language::Hebrew,
            LanguageArg::Greek => Language::Greek,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let data_dir = cli.data_dir.as_ref();
    let output = match &cli.command {
        Command::Search {
            query,
            translation,
            limit,
        } => {
            let search = search::execute_search(query, translation.as_deref(), data_dir).await?;
            if cli.json {
                output::verse_search_json(query, &search, *limit)
            } else {
                output::format_verse_search(query, &search, *limit)
            }
        }
        Command::Lookup {
            query,
            language,
            limit,
        } => {
            let language = language.map(Language::from);
            let lookup = search::execute_lookup(query, language, *limit, data_dir)?;
            if cli.json {
                output::lookup_json(query, &lookup)
            } else {
                output::format_lookup(query, &lookup)
            }
        }
        Command::Bookmark {
            book,
            chapter,
            verse,
        } => {
            let outcome = reader::toggle_bookmark(book, *chapter, *verse, data_dir).await?;
            render(cli.json, &outcome, output::format_toggle)
        }
        Command::Highlight {
            book,
            chapter,
            verse,
        } => {
            let outcome = reader::toggle_highlight(book, *chapter, *verse, data_dir).await?;
            render(cli.json, &outcome, output::format_toggle)
        }
        Command::Read { book, chapter } => {
            let view = reader::read_chapter(book, *chapter, data_dir).await?;
            render(cli.json, &view, output::format_chapter)
        }
        Command::Progress => {
            let view = reader::show_progress(data_dir).await?;
            render(cli.json, &view, output::format_progress)
        }
    };

    println!("{}", output);
    Ok(())
}

fn render<T: serde::Serialize>(json: bool, value: &T, human: fn(&T) -> String) -> String {
    if json {
        output::format_json(value)
    } else {
        human(value)
    }
}
