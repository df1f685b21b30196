use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use editstate::counter::{self, Counter};
use editstate::{
    util, Config, EditCore, EditSession, RecordKey, RecordQueryResult, StoreBackend,
};

#[derive(Parser, Debug)]
#[command(name = "editstate")]
#[command(about = "Edit a persisted counter through an editable state", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory (config, database, logs). Defaults to ~/.editstate
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage slot to operate on. Defaults to `default_key` from the config
    #[arg(short, long, global = true)]
    key: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored counter
    Show,

    /// Add to the stored counter
    #[command(alias = "inc")]
    Increment {
        /// Amount to add
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        by: i64,
    },

    /// Overwrite the stored counter
    Set {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Remove the stored counter
    #[command(alias = "rm")]
    Delete,
}

type CounterSession = EditSession<Counter, EditCore>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    // Initialize logging to file (~/.editstate/logs/editstate.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let config = Config::load();
    let core = Arc::new(EditCore::new(config));
    if core.config().backend == StoreBackend::Sqlite && !core.is_persistent() {
        eprintln!("warning: database unavailable, changes will not be saved");
    }

    let key = cli
        .key
        .map(RecordKey::from)
        .unwrap_or_else(|| core.config().default_key.clone());

    match cli.command {
        Command::Show => {
            let (session, outcome) = open_counter(&core, &key).await;
            let value = session.state().get(Counter::COUNTER);
            if outcome.successful {
                println!("{} = {}", key, value);
            } else if core.contains(&key)? {
                bail!("{}", outcome.message);
            } else {
                println!("{} = {} (nothing stored yet)", key, value);
            }
        }
        Command::Increment { by } => {
            let (mut session, _) = open_counter(&core, &key).await;
            counter::increment(session.state_mut(), by);
            save_and_print(&mut session).await?;
        }
        Command::Set { value } => {
            let (mut session, _) = open_counter(&core, &key).await;
            session.state_mut().set(Counter::COUNTER, value);
            save_and_print(&mut session).await?;
        }
        Command::Delete => {
            if core.delete(&key)? {
                println!("Deleted {}", key);
            } else {
                println!("Nothing stored under {}", key);
            }
        }
    }

    Ok(())
}

/// Load the counter stored under `key`, falling back to zero
async fn open_counter(
    core: &Arc<EditCore>,
    key: &RecordKey,
) -> (CounterSession, RecordQueryResult<Counter>) {
    let mut session = EditSession::new(key.clone(), core.clone(), Counter::default());
    let outcome = session.refresh().await;
    if !outcome.successful {
        tracing::debug!(key = %key, message = %outcome.message, "Starting from default counter");
    }
    (session, outcome)
}

async fn save_and_print(session: &mut CounterSession) -> Result<()> {
    let result = session.save().await;
    if !result.successful {
        bail!("{}", result.message);
    }
    println!("{} = {}", session.key(), session.state().get(Counter::COUNTER));
    Ok(())
}
