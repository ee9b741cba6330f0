use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::bot_controller::SearchBudget;

pub const MIN_GRID_SIZE: usize = 3;
pub const MAX_GRID_SIZE: usize = 20;
pub const DEFAULT_SEARCH_NODE_BUDGET: u64 = 2_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Single,
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub grid_size: usize,
    #[serde(default = "default_search_node_budget")]
    pub search_node_budget: u64,
}

fn default_search_node_budget() -> u64 {
    DEFAULT_SEARCH_NODE_BUDGET
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::Single,
            difficulty: Difficulty::Easy,
            grid_size: MIN_GRID_SIZE,
            search_node_budget: DEFAULT_SEARCH_NODE_BUDGET,
        }
    }
}

impl SessionSettings {
    /// The classic board is always searched to the end; larger grids are
    /// capped by `search_node_budget`.
    pub fn search_budget(&self) -> SearchBudget {
        if self.grid_size <= MIN_GRID_SIZE {
            SearchBudget::unlimited()
        } else {
            SearchBudget::nodes(self.search_node_budget)
        }
    }
}

impl Validate for SessionSettings {
    fn validate(&self) -> Result<(), String> {
        if self.grid_size < MIN_GRID_SIZE || self.grid_size > MAX_GRID_SIZE {
            return Err(format!(
                "Grid size must be between {} and {}, got {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE, self.grid_size
            ));
        }
        if self.search_node_budget == 0 {
            return Err("Search node budget must be positive".to_string());
        }
        Ok(())
    }
}
