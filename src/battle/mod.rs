pub mod models;
pub mod form;
pub mod phase;

pub use form::{BattleForm, Field};
pub use models::{BattleRequest, BattleResponse, BattleResult, Combatant, FinalState};
pub use phase::{Phase, SubmitEvent};
