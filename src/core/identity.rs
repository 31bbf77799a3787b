//! Build identity: what is being built and where.

use std::path::{Path, PathBuf};

/// Identifies one build instance.
///
/// `name` seeds every generated filename and `work_root` is the only
/// directory a backend writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildIdentity {
    name: String,
    toplevel: Option<String>,
    work_root: PathBuf,
}

impl BuildIdentity {
    /// Create an identity without an explicit top-level module.
    pub fn new(name: impl Into<String>, work_root: impl Into<PathBuf>) -> Self {
        BuildIdentity {
            name: name.into(),
            toplevel: None,
            work_root: work_root.into(),
        }
    }

    /// Set the top-level module.
    pub fn with_toplevel(mut self, toplevel: impl Into<String>) -> Self {
        let toplevel = toplevel.into();
        self.toplevel = (!toplevel.is_empty()).then_some(toplevel);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn toplevel(&self) -> Option<&str> {
        self.toplevel.as_deref()
    }

    pub fn work_root(&self) -> &Path {
        &self.work_root
    }

    /// Path of a file named `<name>.<ext>` inside the work root.
    pub fn artifact_path(&self, ext: &str) -> PathBuf {
        self.work_root.join(format!("{}.{}", self.name, ext))
    }
}
