//! Match-three (workspace facade crate).
//!
//! Keeps a single `match_three::{core,engine,types}` path for downstream code
//! while the implementation lives in dedicated crates under `crates/`.

pub use match_three_core as core;
pub use match_three_engine as engine;
pub use match_three_types as types;
