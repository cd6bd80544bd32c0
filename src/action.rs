//! Actions the combo engine can request from the host.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One member of the closed set of effects a hotkey can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    IncrementCt,
    DecrementCt,
    IncrementT,
    DecrementT,
    Reset,
    SelectCt,
    SelectT,
    SwapTeams,
}

impl Action {
    /// Every action, in the order bindings are evaluated. The first binding
    /// that matches wins.
    pub const ALL: [Action; 8] = [
        Action::IncrementCt,
        Action::DecrementCt,
        Action::IncrementT,
        Action::DecrementT,
        Action::Reset,
        Action::SelectCt,
        Action::SelectT,
        Action::SwapTeams,
    ];

    /// Stable identifier, also used as the configuration key.
    pub fn id(self) -> &'static str {
        match self {
            Action::IncrementCt => "increment_ct",
            Action::DecrementCt => "decrement_ct",
            Action::IncrementT => "increment_t",
            Action::DecrementT => "decrement_t",
            Action::Reset => "reset",
            Action::SelectCt => "select_ct",
            Action::SelectT => "select_t",
            Action::SwapTeams => "swap_teams",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("Unknown action: {}", s))
    }
}
