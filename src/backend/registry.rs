//! Backend identifiers and construction.
//!
//! Registry lookups never run processes. Tool availability is only probed
//! when a summary is requested.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backend::icestorm::IcestormBackend;
use crate::backend::lifecycle::PipelineRunner;
use crate::backend::trait_def::Backend;
use crate::core::BuildDescription;
use crate::util::process::find_executable;

/// Unique identifier for a toolchain backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendId {
    /// Project IceStorm: yosys, arachne-pnr, icepack
    #[default]
    Icestorm,
}

impl BackendId {
    /// All known backends.
    pub const ALL: &'static [BackendId] = &[BackendId::Icestorm];

    /// Get the backend name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendId::Icestorm => "icestorm",
        }
    }

    /// External tools the generated pipeline calls.
    pub fn tools(&self) -> &'static [&'static str] {
        match self {
            BackendId::Icestorm => &["yosys", "arachne-pnr", "icepack"],
        }
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackendId {
    type Err = BackendIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "icestorm" => Ok(BackendId::Icestorm),
            _ => Err(BackendIdParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid backend ID.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown backend '{0}', valid values: icestorm")]
pub struct BackendIdParseError(pub String);

/// Construct the backend for `id`.
pub fn create_backend(
    id: BackendId,
    description: BuildDescription,
    runner: PipelineRunner,
) -> Box<dyn Backend> {
    match id {
        BackendId::Icestorm => Box::new(IcestormBackend::new(description).with_runner(runner)),
    }
}

/// Summary of a backend for display purposes.
#[derive(Debug, Clone)]
pub struct BackendSummary {
    /// Backend identifier
    pub id: BackendId,

    /// Each required tool and where it was found
    pub tools: Vec<(&'static str, Option<PathBuf>)>,
}

impl BackendSummary {
    /// Whether every tool was found.
    pub fn is_available(&self) -> bool {
        self.tools.iter().all(|(_, path)| path.is_some())
    }
}

/// Probe PATH for the tools of every backend.
pub fn get_backend_summaries() -> Vec<BackendSummary> {
    BackendId::ALL
        .iter()
        .map(|id| BackendSummary {
            id: *id,
            tools: id
                .tools()
                .iter()
                .map(|tool| (*tool, find_executable(tool)))
                .collect(),
        })
        .collect()
}
