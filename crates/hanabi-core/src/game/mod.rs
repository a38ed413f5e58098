pub mod event;
pub mod moves;
pub mod record;
pub mod state;

pub use event::{Event, Replacement};
pub use moves::{Hint, Move};
pub use record::GameRecord;
pub use state::{GameState, MAX_TOKENS, RuleViolation};
