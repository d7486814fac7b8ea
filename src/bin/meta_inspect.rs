//! Command-line front end for metadata search.
//!
//! ```bash
//! # Search a dumped store by collection name or id
//! meta-inspect search --snapshot dump.json --info orders
//!
//! # Force a name lookup for an all-digit collection name
//! meta-inspect search --snapshot dump.json --info 2024 --by-name
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

use meta_inspect::{config, Config, Lookup, SchemaVersion, Searcher, StoreSnapshot};

#[derive(Parser)]
#[command(name = "meta-inspect")]
#[command(version)]
#[command(about = "Inspect collection and segment metadata in a key-value metadata store")]
struct Cli {
    /// Config folder (defaults to ~/mi_workspace/.mi_config)
    #[arg(long, global = true, env = "META_INSPECT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a collection by id or name and summarise its segments
    Search {
        /// The id or name to search for
        #[arg(long)]
        info: String,

        /// JSON store snapshot to read from
        #[arg(long, env = "META_INSPECT_SNAPSHOT")]
        snapshot: PathBuf,

        /// Metadata base path, overrides the config
        #[arg(long)]
        base_path: Option<String>,

        /// Metadata schema version (2.1 or 2.2), overrides the config
        #[arg(long = "schema-version")]
        schema_version: Option<SchemaVersion>,

        /// Treat --info as a collection id
        #[arg(long, conflicts_with = "by_name")]
        by_id: bool,

        /// Treat --info as a collection name
        #[arg(long)]
        by_name: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let config = Config::load_or_create(&config_path).map_err(|e| e.to_string())?;

    match cli.command {
        Commands::Search {
            info,
            snapshot,
            base_path,
            schema_version,
            by_id,
            by_name,
        } => {
            let lookup = if by_id {
                let id = info
                    .parse::<i64>()
                    .map_err(|e| format!("invalid collection id {:?}: {}", info, e))?;
                Lookup::ById(id)
            } else if by_name {
                Lookup::ByName(info)
            } else {
                Lookup::parse(&info)
            };

            let store = StoreSnapshot::load(&snapshot)
                .and_then(StoreSnapshot::into_store)
                .map_err(|e| e.to_string())?;
            let base_path = base_path.unwrap_or(config.base_path);
            let version = schema_version.unwrap_or(config.schema_version);

            let searcher = Searcher::new(&store, &base_path, version);
            println!("{}", searcher.search_lookup(&lookup));
            Ok(())
        }
    }
}
