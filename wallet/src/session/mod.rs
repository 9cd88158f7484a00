//! # Session
//!
//! What the wallet is doing right now: which account is active and the
//! single background task keeping its balance fresh.

pub mod poller;
pub mod state;

pub use poller::{BalancePoller, PollHandle};
pub use state::{Session, SessionAccount};
