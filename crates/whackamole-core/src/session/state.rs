use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use crate::config::grid;

/// Coarse round phase derived from the `running`/`over` flags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, Display, IntoStaticStr,
)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Over,
}

impl SessionPhase {
    /// Check if a phase transition is valid
    ///
    /// Valid transitions:
    /// - Idle -> Running (first start)
    /// - Running -> Running (restart mid-round)
    /// - Running -> Over (timer expiry)
    /// - Over -> Running (next round)
    ///
    /// Nothing ever returns to Idle.
    pub fn is_valid_transition(from: SessionPhase, to: SessionPhase) -> bool {
        matches!(
            (from, to),
            (SessionPhase::Idle, SessionPhase::Running)
                | (SessionPhase::Running, SessionPhase::Running)
                | (SessionPhase::Running, SessionPhase::Over)
                | (SessionPhase::Over, SessionPhase::Running)
        )
    }
}

/// Result of advancing the countdown by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No round in progress; nothing changed.
    Ignored,
    Continue { time_remaining_secs: u32 },
    /// The round just ended. Reported once per round.
    Expired { final_score: u32 },
}

/// Authoritative state of one game.
///
/// `running` and `over` are never both true. While running, the active hole
/// is always inside the grid it was started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub score: u32,
    pub time_remaining_secs: u32,
    active_hole: usize,
    pub running: bool,
    pub over: bool,
}

impl Session {
    pub fn new(round_duration_secs: u32) -> Self {
        Self {
            score: 0,
            time_remaining_secs: round_duration_secs,
            active_hole: grid::IDLE_HOLE,
            running: false,
            over: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.running, self.over) {
            (true, _) => SessionPhase::Running,
            (false, true) => SessionPhase::Over,
            (false, false) => SessionPhase::Idle,
        }
    }

    /// Hole bearing the mole, only meaningful while a round runs.
    pub fn active_hole(&self) -> Option<usize> {
        self.running.then_some(self.active_hole)
    }

    /// Hole the board should draw the mole in, running or not.
    pub fn displayed_hole(&self) -> usize {
        self.active_hole
    }

    /// Begin a fresh round, discarding whatever the current one had.
    pub fn start(&mut self, round_duration_secs: u32, hole: usize) {
        self.score = 0;
        self.time_remaining_secs = round_duration_secs;
        self.active_hole = hole;
        self.running = true;
        self.over = false;
    }

    /// Score a tap. Returns whether it hit the mole.
    pub fn register_hit(&mut self, hole: usize) -> bool {
        if self.running && hole == self.active_hole {
            self.score += 1;
            true
        } else {
            false
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }

        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        if self.time_remaining_secs == 0 {
            self.running = false;
            self.over = true;
            TickOutcome::Expired {
                final_score: self.score,
            }
        } else {
            TickOutcome::Continue {
                time_remaining_secs: self.time_remaining_secs,
            }
        }
    }

    /// Move the mole. Ignored when no round is running.
    pub fn move_mole(&mut self, hole: usize) -> bool {
        if !self.running {
            return false;
        }
        self.active_hole = hole;
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(crate::config::round::ROUND_DURATION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(30);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.score, 0);
        assert_eq!(session.time_remaining_secs, 30);
        assert_eq!(session.active_hole(), None);
        assert_eq!(session.displayed_hole(), 4);
    }

    #[test]
    fn test_hit_only_counts_on_active_hole() {
        let mut session = Session::new(30);
        session.start(30, 2);

        assert!(!session.register_hit(3));
        assert!(session.register_hit(2));
        assert!(session.register_hit(2));
        assert!(!session.register_hit(99));
        assert_eq!(session.score, 2);
    }

    #[test]
    fn test_hit_ignored_when_not_running() {
        let mut session = Session::new(30);
        assert!(!session.register_hit(4));
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_tick_counts_down_and_expires_once() {
        let mut session = Session::new(3);
        session.start(3, 0);
        session.register_hit(0);

        assert_eq!(
            session.tick(),
            TickOutcome::Continue {
                time_remaining_secs: 2
            }
        );
        assert_eq!(
            session.tick(),
            TickOutcome::Continue {
                time_remaining_secs: 1
            }
        );
        assert_eq!(session.tick(), TickOutcome::Expired { final_score: 1 });
        assert_eq!(session.phase(), SessionPhase::Over);
        assert_eq!(session.time_remaining_secs, 0);

        // Further ticks do nothing
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.time_remaining_secs, 0);
        assert!(session.over);
        assert!(!session.running);
    }

    #[test]
    fn test_restart_resets_live_state() {
        let mut session = Session::new(30);
        session.start(30, 1);
        session.register_hit(1);
        session.tick();
        session.tick();

        session.start(30, 5);
        assert_eq!(session.score, 0);
        assert_eq!(session.time_remaining_secs, 30);
        assert_eq!(session.active_hole(), Some(5));
        assert_eq!(session.phase(), SessionPhase::Running);
    }

    #[test]
    fn test_restart_after_over_clears_flag() {
        let mut session = Session::new(1);
        session.start(1, 0);
        session.tick();
        assert!(session.over);

        session.start(1, 0);
        assert!(session.running);
        assert!(!session.over);
    }

    #[test]
    fn test_move_mole_requires_running() {
        let mut session = Session::new(30);
        assert!(!session.move_mole(7));
        assert_eq!(session.displayed_hole(), 4);

        session.start(30, 0);
        assert!(session.move_mole(7));
        assert_eq!(session.active_hole(), Some(7));
    }

    #[test]
    fn test_phase_transitions() {
        use SessionPhase::*;
        assert!(SessionPhase::is_valid_transition(Idle, Running));
        assert!(SessionPhase::is_valid_transition(Running, Running));
        assert!(SessionPhase::is_valid_transition(Running, Over));
        assert!(SessionPhase::is_valid_transition(Over, Running));

        assert!(!SessionPhase::is_valid_transition(Idle, Over));
        assert!(!SessionPhase::is_valid_transition(Over, Idle));
        assert!(!SessionPhase::is_valid_transition(Running, Idle));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(SessionPhase::Running.to_string(), "Running");
        let name: &'static str = SessionPhase::Over.into();
        assert_eq!(name, "Over");
    }
}
