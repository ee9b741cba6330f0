mod config;
mod input;
mod score_board;
mod selfplay;
mod terminal;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tictactoe_engine::config::Validate;
use tictactoe_engine::games::tictactoe::{Difficulty, GameMode};
use tictactoe_engine::{log, logger};

use config::{CliConfig, get_config_store};

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a friend or a minimax bot")]
struct Args {
    /// Path to the YAML config file (defaults to one next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    #[arg(long)]
    grid_size: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    bot_delay_ms: Option<u64>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,

    /// Print engine log lines
    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal (default)
    Play,
    /// Let the bot play against itself
    Selfplay {
        #[arg(long, default_value_t = 10)]
        games: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Single,
    Multi,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Single => GameMode::Single,
            ModeArg::Multi => GameMode::Multi,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(difficulty: DifficultyArg) -> Self {
        match difficulty {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn apply_overrides(mut config: CliConfig, args: &Args) -> CliConfig {
    if let Some(mode) = args.mode {
        config.session.mode = mode.into();
    }
    if let Some(difficulty) = args.difficulty {
        config.session.difficulty = difficulty.into();
    }
    if let Some(grid_size) = args.grid_size {
        config.session.grid_size = grid_size;
    }
    if let Some(bot_delay_ms) = args.bot_delay_ms {
        config.bot_delay_ms = bot_delay_ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        let prefix = if args.use_log_prefix {
            Some("TicTacToe".to_string())
        } else {
            None
        };
        logger::init_logger(prefix);
    }

    let store = get_config_store(args.config.clone());
    let config = apply_overrides(store.load()?, &args);
    config.validate()?;

    if args.save_config {
        store.save(&config)?;
        log!("Saved config to {}", store.path().display());
    }

    match args.command.unwrap_or(Command::Play) {
        Command::Play => {
            let stdin = io::stdin();
            let scores = terminal::run_interactive(&config, stdin.lock(), io::stdout())?;
            log!("Session ended after {} game(s): {}", scores.games(), scores);
        }
        Command::Selfplay { games } => {
            selfplay::run_selfplay(&config, games, io::stdout())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file_values() {
        let args = Args::try_parse_from([
            "tictactoe",
            "--mode",
            "multi",
            "--difficulty",
            "hard",
            "--grid-size",
            "4",
            "--seed",
            "3",
            "selfplay",
            "--games",
            "2",
        ])
        .unwrap();

        let config = apply_overrides(CliConfig::default(), &args);

        assert_eq!(config.session.mode, GameMode::Multi);
        assert_eq!(config.session.difficulty, Difficulty::Hard);
        assert_eq!(config.session.grid_size, 4);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.bot_delay_ms, CliConfig::default().bot_delay_ms);
        assert!(matches!(args.command, Some(Command::Selfplay { games: 2 })));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::try_parse_from(["tictactoe"]).unwrap();
        assert_eq!(apply_overrides(CliConfig::default(), &args), CliConfig::default());
        assert!(args.command.is_none());
    }
}
