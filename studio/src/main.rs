//! Crossword studio CLI.
//!
//! Subcommands cover the puzzle lifecycle outside the interactive editor:
//! create, list, show, delete, export to text documents, share-link
//! encode/import, and LLM word suggestions for a run pattern.

mod services;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use puzzle::grid::Constraint;
use puzzle::model::{Puzzle, PuzzleSize};
use puzzle::words;

use services::export::{self, Document};
use services::recommend::{self, ChatCompletionsClient, RecommendError};
use services::share::{self, ShareError};
use services::storage::{PuzzleStorage, StorageError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("puzzle not found: {0}")]
    PuzzleNotFound(String),
    #[error("share URL could not be decoded")]
    InvalidShareUrl,
    #[error("invalid suggest query: {0}")]
    InvalidQuery(String),
    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("share encode failed: {0}")]
    Share(#[from] ShareError),
    #[error("recommendation failed: {0}")]
    Recommend(#[from] RecommendError),
    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "studio", about = "Crossword authoring toolkit")]
struct Cli {
    #[arg(long, env = "PUZZLE_STORAGE_PATH", default_value = "crossword-puzzles.json")]
    storage: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a blank puzzle and print its id.
    New {
        #[arg(long, default_value = "Untitled Puzzle")]
        title: String,
        #[arg(long, default_value_t = 7)]
        rows: usize,
        #[arg(long, default_value_t = 7)]
        cols: usize,
    },
    /// List stored puzzles.
    List,
    /// Print a puzzle with answers and clues.
    Show { id: String },
    /// Delete a stored puzzle.
    Delete { id: String },
    /// Write the puzzle document (and optionally the answer key) to files.
    Export {
        id: String,
        #[arg(long, default_value_t = false)]
        answers: bool,
        #[arg(long, default_value_t = false, conflicts_with = "answers")]
        both: bool,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print a share URL for a stored puzzle.
    Share {
        id: String,
        #[arg(long, env = "SHARE_BASE_URL", default_value = "https://crossword.example")]
        base_url: String,
    },
    /// Decode a share URL and store the puzzle under a fresh id.
    Import { url: String },
    /// Fetch word suggestions for a run length or a pattern like `수..`.
    Suggest {
        #[arg(long, required_unless_present = "pattern")]
        length: Option<usize>,
        #[arg(long)]
        pattern: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let storage = PuzzleStorage::new(cli.storage);

    match cli.command {
        Command::New { title, rows, cols } => run_new(&storage, title, rows, cols),
        Command::List => run_list(&storage),
        Command::Show { id } => run_show(&storage, &id),
        Command::Delete { id } => run_delete(&storage, &id),
        Command::Export { id, answers, both, out_dir } => {
            run_export(&storage, &id, answers, both, &out_dir)
        }
        Command::Share { id, base_url } => run_share(&storage, &id, &base_url),
        Command::Import { url } => run_import(&storage, &url),
        Command::Suggest { length, pattern } => run_suggest(length, pattern).await,
    }
}

fn load_puzzle(storage: &PuzzleStorage, id: &str) -> Result<Puzzle, CliError> {
    storage.load(id).ok_or_else(|| CliError::PuzzleNotFound(id.to_string()))
}

fn run_new(storage: &PuzzleStorage, title: String, rows: usize, cols: usize) -> Result<(), CliError> {
    let puzzle = Puzzle::new_blank(PuzzleSize::new(rows, cols), title);
    storage.save(&puzzle)?;
    println!("{}", puzzle.id);
    Ok(())
}

fn run_list(storage: &PuzzleStorage) -> Result<(), CliError> {
    for puzzle in storage.load_all() {
        println!(
            "{}  {}x{}  {}  {}",
            puzzle.id, puzzle.size.rows, puzzle.size.cols, puzzle.updated_at, puzzle.title
        );
    }
    Ok(())
}

fn run_show(storage: &PuzzleStorage, id: &str) -> Result<(), CliError> {
    let puzzle = load_puzzle(storage, id)?;
    let document = export::render_document(&puzzle, true);
    println!("{}", export::render_text(&document));
    Ok(())
}

fn run_delete(storage: &PuzzleStorage, id: &str) -> Result<(), CliError> {
    storage.delete(id)?;
    Ok(())
}

fn run_export(
    storage: &PuzzleStorage,
    id: &str,
    answers: bool,
    both: bool,
    out_dir: &Path,
) -> Result<(), CliError> {
    let puzzle = load_puzzle(storage, id)?;
    if both {
        let (puzzle_doc, answers_doc) = export::export_both(&puzzle);
        write_document(out_dir, &puzzle.title, false, &puzzle_doc)?;
        write_document(out_dir, &puzzle.title, true, &answers_doc)?;
    } else {
        let document = export::render_document(&puzzle, answers);
        write_document(out_dir, &puzzle.title, answers, &document)?;
    }
    Ok(())
}

fn write_document(
    out_dir: &Path,
    title: &str,
    include_answers: bool,
    document: &Document,
) -> Result<(), CliError> {
    let path = out_dir.join(export::document_filename(title, include_answers));
    std::fs::write(&path, export::render_text(document))?;
    println!("{}", path.display());
    Ok(())
}

fn run_share(storage: &PuzzleStorage, id: &str, base_url: &str) -> Result<(), CliError> {
    let puzzle = load_puzzle(storage, id)?;
    let url = share::encode_share_url(&puzzle, base_url)?;
    println!("{url}");
    Ok(())
}

fn run_import(storage: &PuzzleStorage, url: &str) -> Result<(), CliError> {
    let mut puzzle = share::decode_share_url(url).ok_or(CliError::InvalidShareUrl)?;
    words::renumber_and_extract(&mut puzzle);
    storage.save(&puzzle)?;
    info!(id = %puzzle.id, title = %puzzle.title, "import: puzzle decoded");
    println!("{}", puzzle.id);
    Ok(())
}

async fn run_suggest(length: Option<usize>, pattern: Option<String>) -> Result<(), CliError> {
    let (length, constraints) = match pattern {
        Some(pattern) => parse_pattern(&pattern)?,
        None => {
            let length =
                length.ok_or_else(|| CliError::InvalidQuery("pass --length or --pattern".to_string()))?;
            (length, Vec::new())
        }
    };

    let client = ChatCompletionsClient::from_env()?;
    let suggestions = recommend::fetch_recommendations(&client, length, &constraints).await;
    for word in suggestions {
        println!("{word}");
    }
    Ok(())
}

/// A pattern is one char per run cell: `.` for unknown, anything else a
/// fixed glyph. `수..` means a 3-glyph word starting with 수.
fn parse_pattern(pattern: &str) -> Result<(usize, Vec<Constraint>), CliError> {
    if pattern.is_empty() {
        return Err(CliError::InvalidQuery("empty pattern".to_string()));
    }
    let mut constraints = Vec::new();
    let mut length = 0;
    for (index, ch) in pattern.chars().enumerate() {
        length = index + 1;
        if ch != '.' {
            constraints.push(Constraint { position: index, char: ch.to_string() });
        }
    }
    Ok((length, constraints))
}
