//! Edaflow.toml project description.
//!
//! The project file lists the design's files with their type tags, the
//! top-level module, parameter overrides and per-backend tool options. It is
//! turned into a [`BuildDescription`] once the work root is known.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::backend::BackendId;
use crate::core::description::BuildDescription;
use crate::core::fileset::{FileSet, FileType, SourceFile};
use crate::core::identity::BuildIdentity;
use crate::core::params::{ParameterOverrides, ToolOptions};
use crate::util::fs::{absolutize, relative_path};

/// Project file name.
pub const MANIFEST_NAME: &str = "Edaflow.toml";

/// Default directory (relative to the project root) holding work roots.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Errors loading a project file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `Edaflow.toml` in `{}` or any parent directory", dir.display())]
    NotFound { dir: PathBuf },

    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse `{}`: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid project `{}`: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

/// Raw `[project]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectSection {
    /// Build name; seeds every generated filename
    pub name: String,

    /// Top-level module
    #[serde(default)]
    pub toplevel: Option<String>,

    /// Toolchain backend
    #[serde(default)]
    pub backend: Option<BackendId>,

    /// Exact work root, relative to the project root
    #[serde(default)]
    pub work_root: Option<PathBuf>,

    /// Extra include directories, relative to the project root
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
}

/// One `[[files]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileEntry {
    pub path: PathBuf,
    pub file_type: FileType,
    #[serde(default)]
    pub include_file: bool,
}

/// Parsed Edaflow.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
    pub project: ProjectSection,

    #[serde(default)]
    pub files: Vec<FileEntry>,

    #[serde(default)]
    pub parameters: ParameterOverrides,

    /// Tool options keyed by backend name
    #[serde(default)]
    pub tool_options: BTreeMap<String, ToolOptions>,
}

/// A loaded project: the manifest plus the directory it lives in.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    manifest_path: PathBuf,
    manifest: Manifest,
}

impl Project {
    /// Load a project from its manifest path.
    pub fn load(manifest_path: &Path) -> Result<Self, ManifestError> {
        let contents =
            std::fs::read_to_string(manifest_path).map_err(|source| ManifestError::Read {
                path: manifest_path.to_path_buf(),
                source,
            })?;
        Self::parse(manifest_path, &contents)
    }

    /// Parse manifest contents as if read from `manifest_path`.
    pub fn parse(manifest_path: &Path, contents: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(contents).map_err(|e| ManifestError::Parse {
            path: manifest_path.to_path_buf(),
            message: e.to_string(),
        })?;

        if manifest.project.name.trim().is_empty() {
            return Err(ManifestError::Invalid {
                path: manifest_path.to_path_buf(),
                message: "`project.name` must not be empty".to_string(),
            });
        }

        let root = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Project {
            root,
            manifest_path: manifest_path.to_path_buf(),
            manifest,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn name(&self) -> &str {
        &self.manifest.project.name
    }

    /// Selected backend, defaulting to icestorm.
    pub fn backend(&self) -> BackendId {
        self.manifest.project.backend.unwrap_or_default()
    }

    /// Resolve the work root.
    ///
    /// An explicit `project.work-root` wins. Otherwise the work root is
    /// `<build_dir>/<name>`, with `build_dir` defaulting to `build`.
    pub fn work_root(&self, build_dir: Option<&Path>) -> PathBuf {
        match &self.manifest.project.work_root {
            Some(dir) => absolutize(&self.root, dir),
            None => {
                let base = build_dir.unwrap_or(Path::new(DEFAULT_BUILD_DIR));
                absolutize(&self.root, base).join(self.name())
            }
        }
    }

    /// Build the description handed to the backend.
    ///
    /// File and include paths are rewritten relative to `work_root`, since
    /// the generated pipeline runs there. `overrides` are applied on top of
    /// the manifest parameters.
    pub fn description(&self, work_root: &Path, overrides: ParameterOverrides) -> BuildDescription {
        let mut identity = BuildIdentity::new(self.name(), work_root);
        if let Some(top) = &self.manifest.project.toplevel {
            identity = identity.with_toplevel(top.clone());
        }

        let rebase = |path: &Path| relative_path(work_root, &absolutize(&self.root, path));

        let mut fileset = FileSet::new();
        for dir in &self.manifest.project.include_dirs {
            fileset.add_include_dir(rebase(dir.as_path()));
        }
        for entry in &self.manifest.files {
            let path = rebase(entry.path.as_path());
            let file = if entry.include_file {
                SourceFile::include(path, entry.file_type.clone())
            } else {
                SourceFile::new(path, entry.file_type.clone())
            };
            fileset.push(file);
        }

        let mut parameters = self.manifest.parameters.clone();
        parameters.merge(overrides);

        let tool_options = self
            .manifest
            .tool_options
            .get(self.backend().as_str())
            .cloned()
            .unwrap_or_default();

        BuildDescription::new(identity, fileset)
            .with_parameters(parameters)
            .with_tool_options(tool_options)
    }
}

/// Search `start` and its parents for a project file.
pub fn find_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(ManifestError::NotFound {
                dir: start.to_path_buf(),
            });
        }
    }
}
