//! Interactive play mode.
//!
//! Holes are tapped by typing their number (1-9) and Enter. Several numbers
//! may be typed on one line.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};
use whackamole_core::export::{format_board, format_round_summary};
use whackamole_core::{
    Accounts, EngineConfig, LedgerPersistence, SessionEngine, SessionEvent,
};

use crate::config::DataStores;
use crate::shutdown::ShutdownSignal;

/// How often the loop checks for typed input and shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayInput {
    Hole(usize),
    Restart,
    Quit,
    Unknown(String),
}

/// Split one typed line into actions. Hole numbers are 1-based.
pub fn parse_line(line: &str) -> Vec<PlayInput> {
    line.split_whitespace()
        .map(|token| match token.to_ascii_lowercase().as_str() {
            "r" | "restart" | "s" | "start" => PlayInput::Restart,
            "q" | "quit" | "exit" => PlayInput::Quit,
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => PlayInput::Hole(n - 1),
                _ => PlayInput::Unknown(token.to_string()),
            },
        })
        .collect()
}

pub fn run(
    stores: &DataStores,
    config: &EngineConfig,
    user: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    check_credentials(user, password)?;
    let shutdown = setup_shutdown_handler()?;

    let engine = match (user, password) {
        (Some(user), Some(password)) => {
            let ledger = Arc::new(stores.open_ledger()?);
            let owner = Accounts::new(Arc::clone(&ledger))
                .sign_in(user, password)
                .context("Sign in failed")?;
            println!("Signed in as {}", owner.display_name);
            SessionEngine::spawn(
                config.clone(),
                LedgerPersistence::new(ledger, owner.owner_id),
            )?
        }
        _ => {
            let store = stores.open_high_score()?;
            println!("High Score: {}", store.high_score());
            SessionEngine::spawn(config.clone(), store)?
        }
    };

    let events = engine.subscribe();
    let input = spawn_input_reader();

    println!("Type hole numbers and Enter to whack. r = restart, q = quit.");
    engine.start()?;

    let result = game_loop(&engine, config, &events, &input, &shutdown);
    engine.shutdown();
    result
}

fn game_loop(
    engine: &SessionEngine,
    config: &EngineConfig,
    events: &Receiver<SessionEvent>,
    input: &Receiver<String>,
    shutdown: &ShutdownSignal,
) -> Result<()> {
    let mut last_score = 0;

    while !shutdown.is_shutdown() {
        loop {
            let line = match input.try_recv() {
                Ok(line) => line,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return Ok(()),
            };
            for action in parse_line(&line) {
                match action {
                    PlayInput::Hole(hole) => {
                        let scored = engine.register_hit(hole);
                        debug!("Tap {} -> {}", hole + 1, scored);
                    }
                    PlayInput::Restart => {
                        engine.start()?;
                    }
                    PlayInput::Quit => return Ok(()),
                    PlayInput::Unknown(token) => println!("Unknown input: {}", token),
                }
            }
        }

        match events.recv_timeout(POLL_INTERVAL) {
            Ok(event) if event.changes_board() => {
                print!("\n{}", format_board(&engine.snapshot(), config.grid_size));
            }
            Ok(SessionEvent::RoundOver { final_score }) => last_score = final_score,
            Ok(SessionEvent::RoundSaved(outcome)) => {
                print!("\n{}", format_round_summary(last_score, Some(&outcome)));
                println!("r = play again, q = quit");
            }
            Ok(SessionEvent::SaveFailed { reason }) => {
                print!("\n{}", format_round_summary(last_score, None));
                warn!("Score not saved: {}", reason);
                println!("Score could not be saved: {}", reason);
                println!("r = play again, q = quit");
            }
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// `--user` and `--password` only make sense together.
fn check_credentials(user: Option<&str>, password: Option<&str>) -> Result<()> {
    match (user, password) {
        (Some(_), None) => bail!("--password is required with --user"),
        (None, Some(_)) => bail!("--user is required with --password"),
        _ => Ok(()),
    }
}

/// Setup graceful shutdown handler with Ctrl+C
fn setup_shutdown_handler() -> Result<Arc<ShutdownSignal>> {
    let shutdown = Arc::new(ShutdownSignal::new());

    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        println!("\nShutting down...");
        shutdown_ctrlc.trigger();
    })?;

    Ok(shutdown)
}

/// Forward stdin lines to the game loop. The thread ends with stdin.
fn spawn_input_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if sender.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    debug!("stdin closed: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}
