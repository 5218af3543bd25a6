//! Headless game layer on top of the rule engine.
//!
//! - [`session`]: move budget, score, win/loss, turn boundaries
//! - [`policy`]: automated swap selection for simulations and benchmarks

pub mod policy;
pub mod session;

pub use match_three_core as core;
pub use match_three_types as types;

pub use policy::{policy_from_str, FirstSwap, Greedy, Policy};
pub use session::{Session, SessionError, SessionStatus, TurnReport};
