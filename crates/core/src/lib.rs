//! Core functionality for the ProofGate relying-party stack.
//!
//! This crate provides the error taxonomy, configuration, and logging
//! bootstrap shared by every ProofGate crate.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, InteractionTexts, PollConfig, RelyingPartyConfig};
pub use error::{OperationError, OperationErrorKind, Result};
