//! Core data structures for edaflow.
//!
//! This module contains the build description every backend consumes:
//! - Typed source files and file sets
//! - Parameter overrides and tool options
//! - Build identity (name, toplevel, work root)
//! - The Edaflow.toml project description

pub mod description;
pub mod fileset;
pub mod identity;
pub mod params;
pub mod project;

pub use description::BuildDescription;
pub use fileset::{FileSet, FileType, SourceFile};
pub use identity::BuildIdentity;
pub use params::{ParamValue, ParameterOverrides, ToolOptions};
pub use project::{find_manifest, ManifestError, Project, MANIFEST_NAME};
