//! Session engine: one owner thread per game.
//!
//! The worker thread is the only place the [`Session`] is mutated. Callers
//! talk to it through a command queue; the countdown and the mole movement are
//! deadlines the worker arms and fires between commands, re-checking
//! `running` each time. Readers get a copy of the state through
//! [`SessionEngine::snapshot`], published after every mutation.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::session::{MoleScheduler, Session, SessionEvent, SessionPhase, TickOutcome};
use crate::storage::ScorePersistence;

enum Command {
    Start { reply: Sender<Session> },
    Hit { hole: usize, reply: Sender<bool> },
    Subscribe(Sender<SessionEvent>),
    Shutdown,
}

/// Handle to a running game.
///
/// Dropping the handle stops the worker thread; a round that has not expired
/// by then is discarded without being persisted.
pub struct SessionEngine {
    commands: Sender<Command>,
    snapshot: Arc<RwLock<Session>>,
    worker: Option<JoinHandle<()>>,
}

impl SessionEngine {
    pub fn spawn<P>(config: EngineConfig, persistence: P) -> Result<Self>
    where
        P: ScorePersistence + 'static,
    {
        config.validate()?;

        let (commands, receiver) = mpsc::channel();
        let snapshot = Arc::new(RwLock::new(Session::new(config.round_duration_secs)));
        let worker = SessionWorker::new(
            config,
            Box::new(persistence),
            receiver,
            Arc::clone(&snapshot),
        );

        let handle = thread::Builder::new()
            .name("whackamole-session".to_string())
            .spawn(move || worker.run())?;

        Ok(Self {
            commands,
            snapshot,
            worker: Some(handle),
        })
    }

    /// Start a round, or restart the current one from scratch.
    ///
    /// Returns the state right after the reset.
    pub fn start(&self) -> Result<Session> {
        let (reply, response) = mpsc::channel();
        self.commands
            .send(Command::Start { reply })
            .map_err(|_| Error::EngineUnavailable)?;
        response.recv().map_err(|_| Error::EngineUnavailable)
    }

    /// Tap a hole. Returns whether the tap scored.
    ///
    /// Taps outside the grid, taps on an empty hole and taps while no round
    /// runs are ignored.
    pub fn register_hit(&self, hole: usize) -> bool {
        let (reply, response) = mpsc::channel();
        if self.commands.send(Command::Hit { hole, reply }).is_err() {
            debug!("Tap on hole {} dropped: engine stopped", hole);
            return false;
        }
        response.recv().unwrap_or(false)
    }

    pub fn snapshot(&self) -> Session {
        *self
            .snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Receive every event from now on. The receiver may be dropped at any
    /// time.
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        let (sender, receiver) = mpsc::channel();
        if self.commands.send(Command::Subscribe(sender)).is_err() {
            warn!("Subscribe on a stopped engine");
        }
        receiver
    }

    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(handle) = self.worker.take() {
            let _ = self.commands.send(Command::Shutdown);
            if handle.join().is_err() {
                error!("Session worker panicked");
            }
        }
    }
}

impl Drop for SessionEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

struct SessionWorker {
    config: EngineConfig,
    session: Session,
    scheduler: MoleScheduler,
    persistence: Box<dyn ScorePersistence>,
    commands: Receiver<Command>,
    snapshot: Arc<RwLock<Session>>,
    subscribers: Vec<Sender<SessionEvent>>,
    next_tick: Option<Instant>,
    next_move: Option<Instant>,
}

impl SessionWorker {
    fn new(
        config: EngineConfig,
        persistence: Box<dyn ScorePersistence>,
        commands: Receiver<Command>,
        snapshot: Arc<RwLock<Session>>,
    ) -> Self {
        Self {
            session: Session::new(config.round_duration_secs),
            scheduler: MoleScheduler::from_config(&config),
            config,
            persistence,
            commands,
            snapshot,
            subscribers: Vec::new(),
            next_tick: None,
            next_move: None,
        }
    }

    fn run(mut self) {
        debug!("Session worker started");

        loop {
            let command = match self.next_deadline() {
                Some(deadline) => {
                    let timeout = deadline.saturating_duration_since(Instant::now());
                    match self.commands.recv_timeout(timeout) {
                        Ok(command) => Some(command),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match self.commands.recv() {
                    Ok(command) => Some(command),
                    Err(_) => break,
                },
            };

            if matches!(command, Some(Command::Shutdown)) {
                break;
            }
            self.process(command, Instant::now());
        }

        if self.session.running {
            info!(
                "Engine stopped mid-round, discarding score {}",
                self.session.score
            );
        }
        debug!("Session worker stopped");
    }

    fn next_deadline(&self) -> Option<Instant> {
        match (self.next_tick, self.next_move) {
            (Some(tick), Some(mv)) => Some(tick.min(mv)),
            (tick, mv) => tick.or(mv),
        }
    }

    /// Timers that fell due while a command waited in the queue fire first,
    /// so a tap that arrives after expiry cannot score.
    fn process(&mut self, command: Option<Command>, now: Instant) {
        self.fire_due_timers(now);
        if let Some(command) = command {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start { reply } => {
                self.start_round();
                let _ = reply.send(self.session);
            }
            Command::Hit { hole, reply } => {
                let scored = self.session.register_hit(hole);
                if scored {
                    self.publish();
                    self.emit(SessionEvent::Hit {
                        hole,
                        score: self.session.score,
                    });
                }
                let _ = reply.send(scored);
            }
            Command::Subscribe(sender) => self.subscribers.push(sender),
            Command::Shutdown => {}
        }
    }

    fn start_round(&mut self) {
        let from = self.session.phase();
        if from == SessionPhase::Running {
            info!(
                "Restarting round, discarding score {} with {}s left",
                self.session.score, self.session.time_remaining_secs
            );
        }

        let hole = self.scheduler.next_hole();
        self.session.start(self.config.round_duration_secs, hole);
        debug_assert!(SessionPhase::is_valid_transition(from, self.session.phase()));

        let now = Instant::now();
        self.next_tick = Some(now + self.config.tick_interval());
        self.next_move = Some(now + self.scheduler.next_delay());

        info!(
            "Round started: {}s, mole at hole {}",
            self.config.round_duration_secs, hole
        );
        self.publish();
        self.emit(SessionEvent::Started {
            hole,
            time_remaining_secs: self.session.time_remaining_secs,
        });
    }

    fn fire_due_timers(&mut self, now: Instant) {
        // Catch up on every tick that fell due while the worker was busy.
        while let Some(due) = self.next_tick.filter(|due| *due <= now) {
            self.next_tick = Some(due + self.config.tick_interval());
            self.countdown_tick();
        }

        if let Some(due) = self.next_move
            && due <= now
        {
            self.move_mole(now);
        }
    }

    fn countdown_tick(&mut self) {
        match self.session.tick() {
            TickOutcome::Continue {
                time_remaining_secs,
            } => {
                debug!("Tick: {}s left", time_remaining_secs);
                self.publish();
                self.emit(SessionEvent::Tick {
                    time_remaining_secs,
                });
            }
            TickOutcome::Expired { final_score } => {
                self.next_tick = None;
                self.next_move = None;
                info!("Round over, final score {}", final_score);
                self.publish();
                self.emit(SessionEvent::Tick {
                    time_remaining_secs: 0,
                });
                self.emit(SessionEvent::RoundOver { final_score });
                self.finalize_round(final_score);
            }
            TickOutcome::Ignored => {
                self.next_tick = None;
            }
        }
    }

    fn move_mole(&mut self, now: Instant) {
        if !self.session.running {
            self.next_move = None;
            return;
        }

        let hole = self.scheduler.next_hole();
        self.session.move_mole(hole);
        self.next_move = Some(now + self.scheduler.next_delay());
        debug!("Mole moved to hole {}", hole);
        self.publish();
        self.emit(SessionEvent::MoleMoved { hole });
    }

    /// Hand the finished round to the store. A failure leaves the round over.
    fn finalize_round(&mut self, score: u32) {
        match self.persistence.finalize_round(score, Utc::now()) {
            Ok(outcome) => {
                info!("Round saved: {:?}", outcome);
                self.emit(SessionEvent::RoundSaved(outcome));
            }
            Err(e) => {
                if matches!(e, Error::ForeignKeyViolation { .. }) {
                    error!("Round score {} has no valid owner: {}", score, e);
                } else {
                    warn!("Failed to save round score {}: {}", score, e);
                }
                self.emit(SessionEvent::SaveFailed {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn publish(&self) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = self.session;
    }

    fn emit(&mut self, event: SessionEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
