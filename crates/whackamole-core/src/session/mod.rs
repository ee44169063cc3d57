//! Game session: state, mole scheduling and the engine that drives them.

mod engine;
mod event;
mod scheduler;
mod state;

pub use engine::SessionEngine;
pub use event::SessionEvent;
pub use scheduler::MoleScheduler;
pub use state::{Session, SessionPhase, TickOutcome};
