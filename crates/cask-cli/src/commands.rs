use std::sync::Arc;

use cask_server::{CaskServer, ServerConfig};
use cask_store::{BlobStore, MemoryStore};
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => Ok(ServerConfig::load(path)?),
        None => Ok(ServerConfig::default()),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let store: Arc<dyn BlobStore> = match config.memory_capacity_gib {
        Some(capacity) => Arc::new(MemoryStore::with_capacity_gib(capacity)),
        None => Arc::new(MemoryStore::new()),
    };

    println!(
        "{} cask gateway on {}",
        "✓".green().bold(),
        config.bind_addr.to_string().bold()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(CaskServer::new(config, store).serve())?;
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    println!("bind_addr          = {}", config.bind_addr.to_string().bold());
    println!("max_upload_bytes   = {}", config.max_upload_bytes);
    println!(
        "lock_timeout_ms    = {}",
        match config.lock_timeout_ms {
            Some(ms) => ms.to_string(),
            None => "unbounded".into(),
        }
    );
    println!("serialized_remove  = {}", config.serialized_remove);
    println!(
        "memory_capacity_gib = {}",
        match config.memory_capacity_gib {
            Some(gib) => format!("{gib}"),
            None => "unbounded".into(),
        }
    );
    Ok(())
}
