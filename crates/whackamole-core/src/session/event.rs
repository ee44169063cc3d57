use crate::storage::FinalizeOutcome;

/// Change notifications pushed to [`SessionEngine::subscribe`] receivers.
///
/// [`SessionEngine::subscribe`]: crate::session::SessionEngine::subscribe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started {
        hole: usize,
        time_remaining_secs: u32,
    },
    Tick {
        time_remaining_secs: u32,
    },
    MoleMoved {
        hole: usize,
    },
    Hit {
        hole: usize,
        score: u32,
    },
    RoundOver {
        final_score: u32,
    },
    RoundSaved(FinalizeOutcome),
    /// The round ended normally but its score could not be stored.
    SaveFailed {
        reason: String,
    },
}

impl SessionEvent {
    /// Whether a shell needs to redraw the board for this event.
    pub fn changes_board(&self) -> bool {
        matches!(
            self,
            SessionEvent::Started { .. }
                | SessionEvent::Tick { .. }
                | SessionEvent::MoleMoved { .. }
                | SessionEvent::Hit { .. }
        )
    }
}
