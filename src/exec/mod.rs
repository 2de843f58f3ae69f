// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] builds and runs Symfony console commands with
//!   `tokio::process::Command`.
//! - [`backend`] provides the `WarmupBackend` trait used by the monitor and
//!   the production `ConsoleBackend`; tests replace it with a fake.

pub mod backend;
pub mod command;

pub use backend::{ConsoleBackend, WarmupBackend};
pub use command::SymfonyConsole;
