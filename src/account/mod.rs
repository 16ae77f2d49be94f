//! Account model and the store that guards it.
//!
//! Everything user-owned lives here: the account record and team types,
//! the serializable transition vocabulary, and the store that mediates
//! every read and write against the ledger file.

pub mod store;
pub mod transition;
pub mod types;

pub use store::{AccountStore, Provisioned};
pub use transition::Transition;
pub use types::{Account, CardId, Team, TeamRole, UserId, DAILY_BATTLE_LIMIT};
