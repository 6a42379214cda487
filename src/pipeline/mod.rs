//! Pipeline entry points.
//!
//! - `run_once`: one pass over all targets
//! - `run_validate`: check configuration
//! - `run_info`: show ledger and target summary

pub mod info;
pub mod pass;
pub mod run;
pub mod validate;

pub use info::run_info;
pub use pass::{NOTIFICATIONS_PER_TARGET, Orchestrator};
pub use run::{RunOptions, run_once};
pub use validate::run_validate;
