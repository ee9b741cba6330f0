use std::error::Error;
use std::io::Write;

use tictactoe_engine::games::tictactoe::{GameMode, SessionSettings, TicTacToeSession};
use tictactoe_engine::log;

use crate::config::CliConfig;
use crate::score_board::ScoreBoard;
use crate::terminal::{describe_status, session_rng};

/// Lets the configured bot play both sides `games` times.
pub fn run_selfplay<W: Write>(
    config: &CliConfig,
    games: u32,
    mut output: W,
) -> Result<ScoreBoard, Box<dyn Error>> {
    let settings = SessionSettings {
        mode: GameMode::Multi,
        ..config.session.clone()
    };
    let mut session = TicTacToeSession::new("selfplay", settings, session_rng(config))?;
    let mut scores = ScoreBoard::default();

    for game in 1..=games {
        session.reset();
        while let Some(mark) = session.game_state().current_mark() {
            let index = session.suggest_move()?;
            session.place_mark(mark, index)?;
        }

        let status = session.game_state().status();
        scores.record(status);
        log!(
            "[selfplay] Game {} finished after {} moves: {:?}",
            game,
            session.game_state().history().applied().len(),
            status
        );
        writeln!(output, "Game {}: {}", game, describe_status(status))?;
    }

    writeln!(output, "Totals: {}", scores)?;
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::games::tictactoe::Difficulty;

    fn config(difficulty: Difficulty, seed: u64) -> CliConfig {
        CliConfig {
            session: SessionSettings {
                difficulty,
                ..SessionSettings::default()
            },
            bot_delay_ms: 0,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_hard_selfplay_always_draws() {
        let mut output = Vec::new();
        let scores = run_selfplay(&config(Difficulty::Hard, 1), 3, &mut output).unwrap();

        assert_eq!(scores.draws, 3);
        assert!(String::from_utf8(output).unwrap().contains("Totals: X: 0  O: 0  Draws: 3"));
    }

    #[test]
    fn test_easy_selfplay_is_reproducible() {
        let mut first_output = Vec::new();
        let mut second_output = Vec::new();
        let first = run_selfplay(&config(Difficulty::Easy, 5), 20, &mut first_output).unwrap();
        let second = run_selfplay(&config(Difficulty::Easy, 5), 20, &mut second_output).unwrap();

        assert_eq!(first.games(), 20);
        assert_eq!(first, second);
        assert_eq!(first_output, second_output);
    }
}
