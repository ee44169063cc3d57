//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::config::grid::GRID_COLUMNS;
use crate::session::Session;
use crate::storage::{FinalizeOutcome, LeaderboardEntry, OwnerId};

/// Render the score/timer line and the hole grid.
///
/// Holes are labelled 1-based so they match the keys the player types. The
/// mole is drawn between rounds too, in the centre before the first one.
pub fn format_board(session: &Session, grid_size: usize) -> String {
    let mut output = String::new();

    let timer = if session.running && session.time_remaining_secs <= 5 {
        format!("{}", session.time_remaining_secs.red().bold())
    } else {
        session.time_remaining_secs.to_string()
    };
    let _ = writeln!(output, "  Score: {:<6} Timer: {}", session.score, timer);

    let border: String = "━".repeat(GRID_COLUMNS * 6 + 1);
    let _ = writeln!(output, "  {}", border.dimmed());

    let mole = session.displayed_hole();
    for row_start in (0..grid_size).step_by(GRID_COLUMNS) {
        let mut row = String::from("  ");
        for hole in row_start..(row_start + GRID_COLUMNS).min(grid_size) {
            let cell = if mole == hole {
                format!("{}", " (o) ".on_yellow().black())
            } else {
                format!(" [{}] ", hole + 1)
            };
            row.push_str(&cell);
            row.push(' ');
        }
        let _ = writeln!(output, "{}", row.trim_end());
    }
    let _ = writeln!(output, "  {}", border.dimmed());

    output
}

/// Final score line plus what the store made of it.
pub fn format_round_summary(final_score: u32, outcome: Option<&FinalizeOutcome>) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "  Game Over! Final Score: {}",
        final_score.to_string().bold()
    );

    match outcome {
        Some(FinalizeOutcome::HighScore {
            high_score,
            is_new_best: true,
        }) => {
            let _ = writeln!(output, "  {} {}", "NEW HIGH SCORE".green().bold(), high_score);
        }
        Some(FinalizeOutcome::HighScore { high_score, .. }) => {
            let _ = writeln!(output, "  High Score: {}", high_score);
        }
        Some(FinalizeOutcome::Logged { personal_best, .. }) => {
            let best = if *personal_best == final_score && final_score > 0 {
                format!("{}", personal_best.green())
            } else {
                personal_best.to_string()
            };
            let _ = writeln!(output, "  Personal Best: {}", best);
        }
        None => {}
    }

    output
}

/// Header of the scores view. An owner with no rounds shows a best of 0.
pub fn format_scores_header(username: &str, personal_best: Option<u32>) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "  User: {}", username.bold());
    let _ = writeln!(
        output,
        "  Personal Best: {}",
        personal_best.unwrap_or(0).cyan().bold()
    );
    output
}

/// Ranked leaderboard, one row per owner. `current` is highlighted.
pub fn format_leaderboard(entries: &[LeaderboardEntry], current: Option<OwnerId>) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "  Leaderboard (best per user)");

    if entries.is_empty() {
        let _ = writeln!(output, "  {}", "No scores yet".dimmed());
        return output;
    }

    let name_width = entries
        .iter()
        .map(|e| e.display_name.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    for (index, entry) in entries.iter().enumerate() {
        let rank = format!("#{}", index + 1);
        let name = format!("{:<width$}", entry.display_name, width = name_width);
        let name = if current == Some(entry.owner_id) {
            format!("{}", name.yellow().bold())
        } else {
            name
        };
        let _ = writeln!(
            output,
            "  {:<4} {}  {}",
            rank.dimmed(),
            name,
            entry.best_score.cyan()
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: OwnerId, name: &str, best: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            owner_id: id,
            display_name: name.to_string(),
            best_score: best,
        }
    }

    #[test]
    fn test_idle_board_shows_centre_mole() {
        let session = Session::new(30);
        let board = format_board(&session, 9);
        for label in (1..=9).filter(|&label| label != 5) {
            assert!(board.contains(&format!("[{}]", label)));
        }
        assert!(!board.contains("[5]"));
        assert!(board.contains("(o)"));
        assert!(board.contains("Score: 0"));
        assert!(board.contains("Timer: 30"));
    }

    #[test]
    fn test_board_marks_mole() {
        let mut session = Session::new(30);
        session.start(30, 4);
        let board = format_board(&session, 9);
        assert!(board.contains("(o)"));
        assert!(!board.contains("[5]"));
        assert!(board.contains("[4]"));
    }

    #[test]
    fn test_summary_new_best() {
        let outcome = FinalizeOutcome::HighScore {
            high_score: 12,
            is_new_best: true,
        };
        let summary = format_round_summary(12, Some(&outcome));
        assert!(summary.contains("Game Over! Final Score:"));
        assert!(summary.contains("NEW HIGH SCORE"));
    }

    #[test]
    fn test_summary_personal_best() {
        let outcome = FinalizeOutcome::Logged {
            record_id: 3,
            personal_best: 20,
        };
        let summary = format_round_summary(4, Some(&outcome));
        assert!(summary.contains("Personal Best: 20"));
    }

    #[test]
    fn test_summary_without_outcome() {
        let summary = format_round_summary(4, None);
        assert_eq!(summary.lines().count(), 1);
    }

    #[test]
    fn test_scores_header_absent_best() {
        let header = format_scores_header("carol", None);
        assert!(header.contains("carol"));
        assert!(header.contains('0'));
    }

    #[test]
    fn test_leaderboard_ranks() {
        let entries = [entry(1, "A", 20), entry(2, "B", 15)];
        let board = format_leaderboard(&entries, Some(2));
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("#1") && lines[1].contains('A'));
        assert!(lines[2].contains("#2") && lines[2].contains('B'));
    }

    #[test]
    fn test_empty_leaderboard() {
        let board = format_leaderboard(&[], None);
        assert!(board.contains("No scores yet"));
    }
}
