//! High-level operations.
//!
//! This module contains the implementation of edaflow commands.

pub mod edaflow_build;
pub mod edaflow_clean;
pub mod edaflow_configure;
pub mod session;

pub use edaflow_build::{build, BuildOptions, BuildOutcome};
pub use edaflow_clean::{clean, CleanOptions, CleanOutcome};
pub use edaflow_configure::configure;
pub use session::{open_session, open_session_with, parse_param_overrides, Session, SessionOptions};
