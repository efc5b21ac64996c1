use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result, miette};
use quotebook::application::form::FormState;
use quotebook::application::repository::{DocumentRepository, SaveOutcome};
use quotebook::domain::document::Document;
use quotebook::domain::invoice::Invoice;
use quotebook::domain::ports::KeyValueStoreBox;
use quotebook::domain::quotation::Quotation;
use quotebook::error::DocumentError;
use quotebook::infrastructure::in_memory::InMemoryStore;
use quotebook::infrastructure::json_file::JsonFileStore;
use quotebook::interfaces::csv::breakdown_writer::BreakdownWriter;
use quotebook::interfaces::csv::history_writer::HistoryWriter;
use quotebook::interfaces::json::document_reader::DocumentReader;
use quotebook::interfaces::json::document_writer::DocumentWriter;
use quotebook::interfaces::text::preview::{render_invoice, render_quotation};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to keep documents in, one JSON file per collection.
    #[arg(long, global = true, env = "QUOTEBOOK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true, env = "QUOTEBOOK_DB_PATH", conflicts_with = "data_dir")]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Quotation,
    Invoice,
}

#[derive(Subcommand)]
enum Command {
    /// Print the per-currency payment breakdown of a quotation JSON file
    Calc {
        file: PathBuf,
        /// Print the breakdown as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Import a JSON document into a new record and print its id
    Import { kind: Kind, file: PathBuf },
    /// List stored documents, newest first, as CSV
    List { kind: Kind },
    /// Print a stored document as a text preview
    Show { kind: Kind, id: String },
    /// Print a stored document as JSON
    Export { kind: Kind, id: String },
    /// Copy a stored document under a new id and the next document number
    Duplicate { kind: Kind, id: String },
    /// Delete a stored document
    Delete { kind: Kind, id: String },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "quotebook=info".to_string()),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn open_store(cli: &Cli) -> Result<KeyValueStoreBox> {
    if let Some(db_path) = &cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        {
            use quotebook::infrastructure::rocksdb::RocksDBStore;
            info!(path = %db_path.display(), "using RocksDB storage");
            return Ok(Box::new(RocksDBStore::open(db_path).into_diagnostic()?));
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        {
            warn!(
                path = %db_path.display(),
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            return Ok(Box::new(InMemoryStore::new()));
        }
    }

    if let Some(dir) = &cli.data_dir {
        info!(path = %dir.display(), "using JSON file storage");
        return Ok(Box::new(JsonFileStore::open(dir).into_diagnostic()?));
    }

    info!("no data location configured, documents are kept in memory");
    Ok(Box::new(InMemoryStore::new()))
}

fn calc(file: PathBuf, json: bool) -> Result<()> {
    let mut form = FormState::<Quotation>::default();
    DocumentReader::new(File::open(file).into_diagnostic()?)
        .import_into(&mut form)
        .into_diagnostic()?;

    let breakdown = form.breakdown();
    let stdout = io::stdout();
    if json {
        DocumentWriter::new(stdout.lock())
            .write(&breakdown)
            .into_diagnostic()?;
    } else {
        BreakdownWriter::new(stdout.lock())
            .write_breakdown(&breakdown)
            .into_diagnostic()?;
    }
    Ok(())
}

/// Runs a storage-backed command against the collection of kind `D`.
async fn run<D: Document>(
    command: Command,
    store: KeyValueStoreBox,
    render: fn(&D) -> String,
) -> Result<()> {
    let repo = DocumentRepository::<D>::new(store);
    let stdout = io::stdout();

    match command {
        Command::Import { file, .. } => {
            let mut form = FormState::<D>::initialize();
            DocumentReader::new(File::open(file).into_diagnostic()?)
                .import_into(&mut form)
                .into_diagnostic()?;

            match form.save(&repo).await.into_diagnostic()? {
                SaveOutcome::Rejected => {
                    return Err(miette!(
                        "document {:?} is missing required fields and was not saved",
                        form.document().code()
                    ));
                }
                _ => println!("{}", form.document().id()),
            }
        }
        Command::List { .. } => {
            let documents = repo.load_all().await.into_diagnostic()?;
            HistoryWriter::new(stdout.lock())
                .write_documents(&documents)
                .into_diagnostic()?;
        }
        Command::Show { id, .. } => {
            let document = find(&repo, &id).await?;
            print!("{}", render(&document));
        }
        Command::Export { id, .. } => {
            let document = find(&repo, &id).await?;
            DocumentWriter::new(stdout.lock())
                .write(&document)
                .into_diagnostic()?;
        }
        Command::Duplicate { id, .. } => {
            let mut form = FormState::<D>::default();
            match form.duplicate(&repo, &id).await.into_diagnostic()? {
                Some(new_id) => println!("{new_id}"),
                None => return Err(DocumentError::NotFound(id)).into_diagnostic(),
            }
        }
        Command::Delete { id, .. } => {
            if !repo.delete(&id).await.into_diagnostic()? {
                warn!(id = %id, "nothing to delete");
            }
        }
        Command::Calc { .. } => unreachable!("calc does not touch storage"),
    }
    Ok(())
}

async fn find<D: Document>(repo: &DocumentRepository<D>, id: &str) -> Result<D> {
    repo.find(id)
        .await
        .into_diagnostic()?
        .ok_or_else(|| DocumentError::NotFound(id.to_string()))
        .into_diagnostic()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let kind = match &cli.command {
        Command::Calc { file, json } => return calc(file.clone(), *json),
        Command::Import { kind, .. }
        | Command::List { kind }
        | Command::Show { kind, .. }
        | Command::Export { kind, .. }
        | Command::Duplicate { kind, .. }
        | Command::Delete { kind, .. } => *kind,
    };

    let store = open_store(&cli)?;
    match kind {
        Kind::Quotation => run::<Quotation>(cli.command, store, render_quotation).await,
        Kind::Invoice => run::<Invoice>(cli.command, store, render_invoice).await,
    }
}
