//! Normalized build description handed to a backend.

use crate::core::fileset::FileSet;
use crate::core::identity::BuildIdentity;
use crate::core::params::{ParameterOverrides, ToolOptions};

/// Everything a backend needs to generate its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDescription {
    pub identity: BuildIdentity,
    pub fileset: FileSet,
    pub parameters: ParameterOverrides,
    pub tool_options: ToolOptions,
}

impl BuildDescription {
    /// Create a description with no parameter overrides or tool options.
    pub fn new(identity: BuildIdentity, fileset: FileSet) -> Self {
        BuildDescription {
            identity,
            fileset,
            parameters: ParameterOverrides::new(),
            tool_options: ToolOptions::new(),
        }
    }

    /// Set parameter overrides.
    pub fn with_parameters(mut self, parameters: ParameterOverrides) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set tool options.
    pub fn with_tool_options(mut self, tool_options: ToolOptions) -> Self {
        self.tool_options = tool_options;
        self
    }
}
