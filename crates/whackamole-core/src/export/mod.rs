//! Terminal rendering of boards, round results and leaderboards.

mod console;

pub use console::*;
