#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Place(usize),
    Undo,
    Redo,
    NewGame,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<PlayerCommand, String> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "u" | "undo" => Ok(PlayerCommand::Undo),
        "r" | "redo" => Ok(PlayerCommand::Redo),
        "n" | "new" => Ok(PlayerCommand::NewGame),
        "h" | "help" | "?" => Ok(PlayerCommand::Help),
        "q" | "quit" | "exit" => Ok(PlayerCommand::Quit),
        other => other
            .parse::<usize>()
            .map(PlayerCommand::Place)
            .map_err(|_| format!("Unknown command '{}', type 'h' for help", trimmed)),
    }
}
