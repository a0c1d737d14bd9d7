//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs` — contract administration + portfolio validation.
//! - `runtime.rs` — periods/report/status reporting flows.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;

pub use admin::{handle_contract_commands, handle_validate_command};
pub use runtime::handle_runtime_commands;
