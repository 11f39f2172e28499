//! Dice roll results shown in the result modal

use serde::{Deserialize, Serialize};

/// A single die after the external resolver has rolled it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDice {
    /// Number of dice rolled
    pub num: u32,
    /// Faces of the die (e.g. 20 for a d20)
    pub roll: u32,
}

impl ResolvedDice {
    pub fn new(num: u32, roll: u32) -> Self {
        Self { num, roll }
    }
}

/// What the dice result modal is asked to display.
///
/// Either a raw dice expression the resolver still has to interpret, or
/// dice that were already resolved client side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiceRoll {
    Unresolved(String),
    Resolved(Vec<ResolvedDice>),
}

impl DiceRoll {
    /// The empty roll; the modal stays hidden while this is set
    pub fn empty() -> Self {
        Self::Unresolved(String::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unresolved(expr) => expr.is_empty(),
            Self::Resolved(dices) => dices.is_empty(),
        }
    }
}

impl Default for DiceRoll {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for DiceRoll {
    fn from(expr: &str) -> Self {
        Self::Unresolved(expr.to_string())
    }
}

impl From<Vec<ResolvedDice>> for DiceRoll {
    fn from(dices: Vec<ResolvedDice>) -> Self {
        Self::Resolved(dices)
    }
}
