//! CLI command implementations.

pub mod high_score;
pub mod play;
pub mod scores;
pub mod signup;
