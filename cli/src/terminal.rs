use std::error::Error;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use tictactoe_engine::games::SessionRng;
use tictactoe_engine::games::tictactoe::{Board, GameStatus, MoveOutcome, TicTacToeSession};

use crate::config::CliConfig;
use crate::input::{PlayerCommand, parse_command};
use crate::score_board::ScoreBoard;

const HELP: &str = "Enter a cell number to place your mark. Commands: u = undo, r = redo, n = new game, h = help, q = quit";

pub fn session_rng(config: &CliConfig) -> SessionRng {
    config
        .seed
        .map(SessionRng::new)
        .unwrap_or_else(SessionRng::from_random)
}

pub fn describe_status(status: GameStatus) -> String {
    match status {
        GameStatus::Won(mark) => format!("Player {} wins!", mark),
        GameStatus::Draw => "It's a draw!".to_string(),
        GameStatus::InProgress => "In progress".to_string(),
    }
}

/// Empty cells show their index so the player knows what to type; cells of
/// the winning line are bracketed.
pub fn render_board(board: &Board, winning_line: Option<&[usize]>) -> String {
    let width = (board.cell_count() - 1).to_string().len() + 2;
    let mut rendered = String::new();

    for (index, mark) in board.cells().iter().enumerate() {
        let text = if board.is_empty_at(index) {
            index.to_string()
        } else if winning_line.is_some_and(|line| line.contains(&index)) {
            format!("[{}]", mark)
        } else {
            mark.to_string()
        };
        rendered.push_str(&format!("{:^width$}", text, width = width));

        if (index + 1) % board.size() == 0 {
            rendered.push('\n');
        } else {
            rendered.push('|');
        }
    }

    rendered
}

pub fn run_interactive<R: BufRead, W: Write>(
    config: &CliConfig,
    input: R,
    output: W,
) -> Result<ScoreBoard, Box<dyn Error>> {
    let session = TicTacToeSession::new("terminal", config.session.clone(), session_rng(config))?;
    let mut game = TerminalGame {
        session,
        input,
        output,
        scores: ScoreBoard::default(),
        bot_delay: Duration::from_millis(config.bot_delay_ms),
        result_recorded: false,
    };
    game.run()?;
    Ok(game.scores)
}

struct TerminalGame<R, W> {
    session: TicTacToeSession,
    input: R,
    output: W,
    scores: ScoreBoard,
    bot_delay: Duration,
    // A game counts once even if it is undone and finished again.
    result_recorded: bool,
}

impl<R: BufRead, W: Write> TerminalGame<R, W> {
    fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", HELP)?;
        self.show_board()?;

        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };

            match command {
                PlayerCommand::Quit => break,
                PlayerCommand::Help => writeln!(self.output, "{}", HELP)?,
                PlayerCommand::NewGame => {
                    self.session.reset();
                    self.result_recorded = false;
                    self.show_board()?;
                }
                PlayerCommand::Undo => match self.session.undo() {
                    Ok(moves) => {
                        writeln!(self.output, "Undid {} move(s)", moves.len())?;
                        self.show_board()?;
                    }
                    Err(e) => writeln!(self.output, "{}", e)?,
                },
                PlayerCommand::Redo => match self.session.redo() {
                    Ok(outcomes) => {
                        for outcome in &outcomes {
                            self.show_outcome(outcome)?;
                        }
                    }
                    Err(e) => writeln!(self.output, "{}", e)?,
                },
                PlayerCommand::Place(index) => self.handle_place(index)?,
            }
        }

        writeln!(self.output, "Final score: {}", self.scores)
    }

    fn handle_place(&mut self, index: usize) -> io::Result<()> {
        let Some(mark) = self.session.game_state().current_mark() else {
            return writeln!(self.output, "Game is over, type 'n' for a new game");
        };

        match self.session.place_mark(mark, index) {
            Ok(outcome) => self.show_outcome(&outcome)?,
            Err(e) => return writeln!(self.output, "{}", e),
        }

        if self.session.is_bot_turn() {
            if !self.bot_delay.is_zero() {
                thread::sleep(self.bot_delay);
            }
            match self.session.play_bot_turn() {
                Ok(outcome) => {
                    writeln!(self.output, "Computer plays {}", outcome.applied.index)?;
                    self.show_outcome(&outcome)?;
                }
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
        Ok(())
    }

    fn show_outcome(&mut self, outcome: &MoveOutcome) -> io::Result<()> {
        write!(
            self.output,
            "{}",
            render_board(&outcome.board, outcome.winning_line.as_deref())
        )?;
        if outcome.status.is_over() {
            writeln!(self.output, "{}", describe_status(outcome.status))?;
            if !self.result_recorded {
                self.scores.record(outcome.status);
                self.result_recorded = true;
            }
            writeln!(self.output, "Score: {}", self.scores)?;
        }
        Ok(())
    }

    fn show_board(&mut self) -> io::Result<()> {
        let rendered = render_board(self.session.game_state().board(), None);
        write!(self.output, "{}", rendered)
    }

    fn prompt(&mut self) -> io::Result<()> {
        match self.session.game_state().current_mark() {
            Some(mark) => write!(self.output, "Player {}> ", mark)?,
            None => write!(self.output, "Game over> ")?,
        }
        self.output.flush()
    }
}
