//! CLI argument definitions for whackamole.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "whackamole")]
#[command(about = "Terminal whack-a-mole with local high scores", version)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "whackamole.toml")]
    pub config: PathBuf,

    /// Directory holding the score stores
    #[arg(long, env = "WHACKAMOLE_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account
    Signup {
        username: String,
        #[arg(long, env = "WHACKAMOLE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Play rounds (signed in: scores go to the leaderboard)
    Play {
        /// Sign in as this user
        #[arg(long)]
        user: Option<String>,
        #[arg(long, env = "WHACKAMOLE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Show personal best and the leaderboard
    Scores {
        #[arg(long)]
        user: String,
        #[arg(long, env = "WHACKAMOLE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the single-player high score
    HighScore {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
