//! Mock interviews: the session state machine, its per-candidate store and exports.

pub mod export;
pub mod handlers;
pub mod question_bank;
pub mod session;
pub mod store;
