//! Todo API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use todo_agenda::api::{self, ApiError, Config};
use todo_agenda::db::{Database, DbError, SqliteDatabase};
use todo_agenda::paths::get_db_path;
use tracing::{error, info};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(todo_api::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(todo_api::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(todo_api::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(author, version, about = "Todo list and agenda API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on (default: TODO_API_PORT env or 3000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Database file path (default: TODO_DB_PATH env or ~/.local/share/todo-agenda/todoApplication.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Serve the OpenAPI reference at /docs
    #[arg(long)]
    docs: bool,
}

async fn serve(cli: Cli) -> Result<(), BinaryError> {
    let mut config = Config::new()
        .with_host(cli.host)
        .with_verbosity(cli.verbose)
        .with_docs(cli.docs);
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }

    let db_path = cli.db.unwrap_or_else(get_db_path);
    info!("Opening database at {}", db_path.display());

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    // The store must be usable before a single request is accepted
    let db = SqliteDatabase::open(&db_path).await.inspect_err(|e| {
        error!("Db Error: {}", e);
    })?;
    db.init_schema().await?;

    if config.enable_docs {
        info!("API docs at http://{}/docs", config.addr());
    }

    api::run(config, db).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    api::init_tracing(cli.verbose);

    serve(cli).await?;
    Ok(())
}
