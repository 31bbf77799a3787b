//! Toolchain backends.
//!
//! A backend turns a [`BuildDescription`](crate::core::BuildDescription)
//! into the scripts and makefiles an external FPGA toolchain needs, then runs
//! the generated pipeline.
//!
//! # Lifecycle
//!
//! ```text
//!   BuildDescription ──► configure() ──► build() ──► done()
//!                          │               │
//!                          ▼               ▼
//!                  Makefile, *.ys,    make (in work_root)
//!                     config.mk
//! ```
//!
//! - **Backend** - Trait every toolchain implements (in `trait_def.rs`)
//! - **Lifecycle** - Shared helpers backends call instead of inheriting (in `lifecycle.rs`)
//! - **Errors** - Stage-tagged configuration/build errors (in `error.rs`)
//! - **Registry** - Backend identifiers and construction (in `registry.rs`)

pub mod error;
pub mod icestorm;
pub mod lifecycle;
pub mod registry;
pub mod trait_def;

pub use error::{BackendError, BuildError, ConfigurationError, Stage};
pub use icestorm::IcestormBackend;
pub use lifecycle::PipelineRunner;
pub use registry::{create_backend, get_backend_summaries, BackendId, BackendIdParseError, BackendSummary};
pub use trait_def::{Backend, BackendArgs, BuildResult, ConfigureResult, GeneratedArtifact};
