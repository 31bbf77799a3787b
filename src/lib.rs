//! edaflow - FPGA toolchain orchestration
//!
//! This crate turns a normalized build description (typed source files,
//! top-level module, parameter overrides, tool options) into the artifacts an
//! external FPGA toolchain needs, and runs that toolchain as a subprocess
//! pipeline.

pub mod backend;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for edaflow unit tests.
///
/// This module is only available when running tests. It provides a mock
/// process launcher and build fixtures.
#[cfg(test)]
pub mod test_support;

pub use backend::{Backend, BackendArgs, BackendError, BackendId};
pub use core::{BuildDescription, BuildIdentity, FileSet, FileType, SourceFile};
pub use util::context::GlobalContext;
