use anyhow::{Context, Result};
use clap::Parser;
use rand_core::OsRng;
use std::io;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod actions;
mod cli;
mod commands;
mod config;
mod defaults;
mod encoding;
mod env;
mod error;
mod executor;
mod key;
mod menu;
mod rpc;
mod signing;
mod types;
mod util;

use crate::actions::{Accounts, ActionOutput};
use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::env::EnvSource;
use crate::error::ExecError;
use crate::executor::outcome_message;
use crate::rpc::JsonRpcProvider;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let env = EnvSource::load(&cli.env_file)?;
    let settings = Settings::resolve(&cli, &env);
    debug!(?settings, "resolved settings");

    let cmd = cli.cmd.unwrap_or(Command::Menu);

    if let Command::Keygen { count, out } = cmd {
        let records = commands::keygen::generate(count, &mut OsRng);
        commands::keygen::emit(records, out)?;
        return Ok(ExitCode::SUCCESS);
    }

    let provider = JsonRpcProvider::new(&settings.rpc_url, settings.rpc_timeout)
        .with_context(|| format!("connecting to {} ({})", settings.rpc_url, settings.network_id))?;
    let accounts = Accounts::new(provider, settings.keys_dir.clone());

    let result = match cmd.into_request() {
        Some(request) => accounts.run(request).await,
        None => match menu::run_menu(io::stdin().lock(), &env, &accounts).await? {
            Some(result) => result,
            None => return Ok(ExitCode::SUCCESS),
        },
    };

    Ok(report(&result))
}

/// Print the outcome the way the operator expects to read it; non-zero exit on failure
fn report(result: &Result<ActionOutput, ExecError>) -> ExitCode {
    match result {
        // the key list was already printed
        Ok(ActionOutput::Keys(list)) => {
            info!(count = list.keys.len(), "listed access keys");
            ExitCode::SUCCESS
        }
        Ok(ActionOutput::Executed(outcome)) => {
            println!("{}", outcome_message(result));
            println!("Transaction hash: {}", outcome.transaction_hash);
            ExitCode::SUCCESS
        }
        Err(_) => {
            println!("{}", outcome_message(result));
            ExitCode::FAILURE
        }
    }
}
