//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without actually starting a game.

use std::path::PathBuf;

use clap::Parser;

// Re-create Args structure for testing since it's not publicly exported
#[derive(Parser)]
#[command(name = "whackamole")]
struct Args {
    #[arg(short, long, default_value = "whackamole.toml")]
    config: PathBuf,

    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    Signup {
        username: String,
        #[arg(long)]
        password: String,
    },
    Play {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    Scores {
        #[arg(long)]
        user: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        json: bool,
    },
    HighScore {
        #[arg(long)]
        json: bool,
    },
}

mod global_args {
    use super::*;

    #[test]
    fn test_no_args_defaults_to_play() {
        let args = Args::try_parse_from(["whackamole"]).unwrap();
        assert_eq!(args.config, PathBuf::from("whackamole.toml"));
        assert!(args.data_dir.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_config_and_data_dir() {
        let args = Args::try_parse_from([
            "whackamole",
            "-c",
            "custom.toml",
            "--data-dir",
            "/tmp/scores",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("custom.toml"));
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/scores")));
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn test_signup() {
        let args =
            Args::try_parse_from(["whackamole", "signup", "alice", "--password", "pw"]).unwrap();
        match args.command {
            Some(Command::Signup { username, password }) => {
                assert_eq!(username, "alice");
                assert_eq!(password, "pw");
            }
            _ => panic!("Expected Signup command"),
        }
    }

    #[test]
    fn test_signup_requires_username() {
        assert!(Args::try_parse_from(["whackamole", "signup", "--password", "pw"]).is_err());
    }

    #[test]
    fn test_play_single_user() {
        let args = Args::try_parse_from(["whackamole", "play"]).unwrap();
        match args.command {
            Some(Command::Play { user, password }) => {
                assert!(user.is_none());
                assert!(password.is_none());
            }
            _ => panic!("Expected Play command"),
        }
    }

    #[test]
    fn test_play_signed_in() {
        let args = Args::try_parse_from([
            "whackamole",
            "play",
            "--user",
            "bob",
            "--password",
            "secret",
        ])
        .unwrap();
        match args.command {
            Some(Command::Play { user, password }) => {
                assert_eq!(user.as_deref(), Some("bob"));
                assert_eq!(password.as_deref(), Some("secret"));
            }
            _ => panic!("Expected Play command"),
        }
    }

    #[test]
    fn test_scores_json() {
        let args = Args::try_parse_from([
            "whackamole",
            "scores",
            "--user",
            "bob",
            "--password",
            "pw",
            "--json",
        ])
        .unwrap();
        match args.command {
            Some(Command::Scores { user, json, .. }) => {
                assert_eq!(user, "bob");
                assert!(json);
            }
            _ => panic!("Expected Scores command"),
        }
    }

    #[test]
    fn test_high_score() {
        let args = Args::try_parse_from(["whackamole", "high-score"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Command::HighScore { json: false })
        ));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Args::try_parse_from(["whackamole", "whack"]).is_err());
    }
}
