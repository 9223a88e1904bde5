//! Tiny Browser - Headless shell
//!
//! Drives the address bar core from a terminal: each input line is an
//! address bar submission or a toolbar action, and every response is printed
//! as one JSON line. Engine callbacks are interleaved on the same task, so the
//! navigation state is only ever touched from one place.

mod commands;
mod engine;
mod intent;
mod state;

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use tiny_core::{Config, InterpretMode};

pub use engine::{HeadlessEngine, Prober};
pub use intent::Intent;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "tiny", version, about = "Tiny browser shell (headless)")]
pub struct Args {
    /// Path to a JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use the legacy "always prepend https://" interpretation
    #[arg(long)]
    pub legacy: bool,

    /// Probe each navigation over the network
    #[arg(long)]
    pub probe: bool,

    /// Address to load on startup instead of the configured homepage
    pub address: Option<String>,
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    tiny_core::init_logging();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if args.legacy {
        config.interpretation = InterpretMode::Legacy;
    }
    if args.probe {
        config.probe_network = true;
    }
    if let Some(address) = args.address {
        config.homepage = address;
    }

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut engine = HeadlessEngine::new(events_tx);
    if config.probe_network {
        let prober = Prober::new(Duration::from_secs(config.probe_timeout_secs))?;
        engine = engine.with_prober(prober);
    }

    let state = AppState::new(config, engine)?;
    tracing::info!("Tiny shell started");

    emit(&commands::navigation::appear(&state))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !dispatch(&state, Intent::parse(&line))? {
                    break;
                }
            }
            Some(event) = events_rx.recv() => {
                emit(&commands::navigation::engine_event(&state, event))?;
            }
        }
    }

    state.shutdown();
    tracing::info!("Tiny shell exiting");
    Ok(())
}

/// Handle one intent. Returns `false` when the shell should exit.
fn dispatch(state: &AppState, intent: Intent) -> anyhow::Result<bool> {
    use commands::navigation;

    match intent {
        Intent::Submit(text) => emit(&navigation::submit_address(state, &text))?,
        Intent::Resolve(text) => emit(&navigation::resolve_input(state, &text))?,
        Intent::Back => emit(&navigation::go_back(state))?,
        Intent::Forward => emit(&navigation::go_forward(state))?,
        Intent::Reload => emit(&navigation::reload(state))?,
        Intent::State => emit(&navigation::navigation_state(state))?,
        Intent::Unknown(action) => emit(&commands::CommandResult::<()>::err(format!(
            "Unknown action: {}",
            action
        )))?,
        Intent::Quit => return Ok(false),
    }
    Ok(true)
}

fn emit<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
