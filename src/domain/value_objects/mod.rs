//! Value objects - Immutable objects defined by their attributes

mod dice;
mod ids;
mod session;
mod toast;

pub use dice::{DiceRoll, ResolvedDice};
pub use ids::*;
pub use session::Session;
pub use toast::{Toast, ToastKind};
