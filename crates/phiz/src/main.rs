mod cli; // Declare the cli module

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, error, info};
use phiz_core::kernel::constants::{APP_NAME, APP_VERSION, DEFAULT_CONFIG_FILE};
use phiz_core::kernel::error::{Error, Result};
use phiz_core::{EventsConfig, EventsManager, ListenerRegistry, Payload};

use crate::cli::{CliSource, builtin_registry};

/// Phiz: fire framework events against configured listeners
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Events config (.json, .yaml or .toml). Defaults to ./events.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print attached listeners in delivery order
    Listeners {
        /// Only this group or event type
        key: Option<String>,
    },
    /// Fire an event and print what the listeners returned
    Fire {
        /// Event type in the form group:name
        event_type: String,
        /// JSON payload passed to listeners
        #[arg(long)]
        data: Option<String>,
        /// Fire as non-cancelable; stopping it becomes an error
        #[arg(long)]
        not_cancelable: bool,
        /// Print the response of every listener that ran
        #[arg(long)]
        collect: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Failed to initialize env_logger: {}", e);
    }
}

fn load_config(path: Option<&Path>) -> Result<EventsConfig> {
    match path {
        Some(path) => Ok(EventsConfig::load(path)?),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Ok(EventsConfig::load(default_path)?)
            } else {
                debug!("No config given and no {} found, starting empty", DEFAULT_CONFIG_FILE);
                Ok(EventsConfig::default())
            }
        }
    }
}

fn print_listeners(manager: &EventsManager, registry: &ListenerRegistry, key: Option<&str>) {
    let keys = match key {
        Some(key) => vec![key.to_string()],
        None => manager.event_types(),
    };
    if keys.iter().all(|key| !manager.has_listeners(key)) {
        println!("No listeners attached.");
        return;
    }
    for key in keys {
        let Some(queue) = manager.queue(&key) else {
            continue;
        };
        println!("{}", key);
        for entry in queue.iter() {
            let name = registry.name_of(entry.listener()).unwrap_or("<anonymous>");
            println!("  {:>6}  {}", entry.priority(), name);
        }
    }
}

fn fire(manager: &EventsManager, event_type: &str, data: Option<&str>, cancelable: bool, collect: bool) -> Result<()> {
    let data = match data {
        Some(raw) => Payload::json(
            serde_json::from_str::<serde_json::Value>(raw)
                .map_err(|e| Error::Other(format!("--data is not valid JSON: {}", e)))?,
        ),
        None => Payload::Null,
    };
    if collect {
        manager.collect_responses(true);
    }

    let status = manager.fire(event_type, &CliSource, data, cancelable)?;

    println!("status: {}", status);
    if manager.is_collecting() {
        for (index, response) in manager.responses().iter().enumerate() {
            println!("response[{}]: {}", index, response);
        }
    }
    Ok(())
}

fn run(args: CliArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let registry = builtin_registry()?;
    let manager = EventsManager::from_config(&config, &registry)?;
    debug!("Events manager ready: {:?}", manager);

    match args.command {
        Commands::Listeners { key } => {
            print_listeners(&manager, &registry, key.as_deref());
            Ok(())
        }
        Commands::Fire {
            event_type,
            data,
            not_cancelable,
            collect,
        } => fire(&manager, &event_type, data.as_deref(), !not_cancelable, collect),
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);
    info!("Starting {} v{}", APP_NAME, APP_VERSION);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
