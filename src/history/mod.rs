//! History Module
//!
//! Keeps the ten most recent exports so a previous design can be reloaded.

mod store;
mod types;

pub use store::{HistoryStore, HISTORY_KEY, MAX_HISTORY};
pub use types::{HistoryEntry, UNTITLED};
