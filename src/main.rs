use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rxledger::application::contract::OrderContract;
use rxledger::domain::ports::LedgerStoreBox;
use rxledger::infrastructure::in_memory::InMemoryLedger;
#[cfg(feature = "storage-rocksdb")]
use rxledger::infrastructure::rocksdb::RocksDBLedger;
use rxledger::interfaces::csv::invocation_reader::InvocationReader;
use rxledger::interfaces::csv::registry_reader::{Registries, RegistryReader};
use rxledger::interfaces::json::outcome_writer::{Outcome, OutcomeWriter};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Invocation script: one `function,arg1,arg2,...` row per call
    input: PathBuf,

    /// Registry table (CSV with header `role,party`, role is hospital or distributor)
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Path to persistent ledger (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Default log filter (trace, debug, info, warn, error); RUST_LOG wins if set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn open_ledger(db_path: Option<&Path>) -> Result<LedgerStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let ledger = RocksDBLedger::open(path).into_diagnostic()?;
            info!(path = %path.display(), "opened persistent ledger");
            Ok(Box::new(ledger))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(path) => {
            warn!(
                path = %path.display(),
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryLedger::new()))
        }
        None => Ok(Box::new(InMemoryLedger::new())),
    }
}

fn load_registries(path: Option<&Path>) -> Result<Registries> {
    let Some(path) = path else {
        warn!("No --registry given; every createOrder will be rejected");
        return Ok(Registries::default());
    };
    let file = File::open(path).into_diagnostic()?;
    let registries = RegistryReader::new(file).registries().into_diagnostic()?;
    info!(
        hospitals = registries.hospitals.len(),
        distributors = registries.distributors.len(),
        "loaded registries"
    );
    Ok(registries)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let ledger = open_ledger(cli.db_path.as_deref())?;
    let registries = load_registries(cli.registry.as_deref())?;
    let contract = OrderContract::new(
        ledger,
        Box::new(registries.hospitals),
        Box::new(registries.distributors),
    );

    // Run invocations in order; one failed call never stops the script
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = InvocationReader::new(file);
    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());
    for item in reader.invocations() {
        match item {
            Ok(invocation) => {
                let result = contract.invoke(&invocation).await;
                writer
                    .write(&Outcome::from_result(&invocation.function, &result))
                    .into_diagnostic()?;
            }
            Err(e) => {
                error!("Error reading invocation: {e}");
                writer
                    .write(&Outcome::failure("", &e))
                    .into_diagnostic()?;
            }
        }
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}
