//! Typed source files and the ordered file sets handed to backends.
//!
//! A backend never interprets HDL. It only looks at the file-type tag to
//! decide whether a file is read by synthesis, fed to place-and-route as a
//! constraint file, or ignored.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Role of a source file in the build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileType {
    /// Verilog/SystemVerilog source read by synthesis
    Hdl,
    /// Pin/placement constraints consumed by place-and-route
    ConstraintFile,
    /// Anything else, kept with its original tag
    Other(String),
}

impl FileType {
    /// Get the canonical tag for this file type.
    pub fn as_str(&self) -> &str {
        match self {
            FileType::Hdl => "verilogSource",
            FileType::ConstraintFile => "PCF",
            FileType::Other(tag) => tag,
        }
    }

    /// Parse a file-type tag.
    ///
    /// Versioned tags such as `verilogSource-2005` map to [`FileType::Hdl`].
    pub fn from_tag(tag: &str) -> Self {
        let base = tag.split('-').next().unwrap_or(tag);
        match base {
            "verilogSource" | "systemVerilogSource" => FileType::Hdl,
            "PCF" => FileType::ConstraintFile,
            _ => FileType::Other(tag.to_string()),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for FileType {
    fn from(tag: String) -> Self {
        FileType::from_tag(&tag)
    }
}

impl From<FileType> for String {
    fn from(ft: FileType) -> Self {
        ft.as_str().to_string()
    }
}

/// A single file in a file set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    path: PathBuf,
    file_type: FileType,
    is_include_file: bool,
}

impl SourceFile {
    /// Create a source file with an explicit type.
    pub fn new(path: impl Into<PathBuf>, file_type: FileType) -> Self {
        SourceFile {
            path: path.into(),
            file_type,
            is_include_file: false,
        }
    }

    /// Create an HDL source file.
    pub fn hdl(path: impl Into<PathBuf>) -> Self {
        Self::new(path, FileType::Hdl)
    }

    /// Create a constraint file.
    pub fn constraint(path: impl Into<PathBuf>) -> Self {
        Self::new(path, FileType::ConstraintFile)
    }

    /// Create an include file. Its directory joins the include path and the
    /// file itself is never read as a source.
    pub fn include(path: impl Into<PathBuf>, file_type: FileType) -> Self {
        SourceFile {
            is_include_file: true,
            ..Self::new(path, file_type)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_type(&self) -> &FileType {
        &self.file_type
    }

    pub fn is_include_file(&self) -> bool {
        self.is_include_file
    }

    /// Path rendered the way it appears in generated artifacts.
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Ordered collection of source files plus the include directories derived
/// from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<SourceFile>,
    include_dirs: Vec<PathBuf>,
}

impl FileSet {
    /// Create an empty file set.
    pub fn new() -> Self {
        FileSet::default()
    }

    /// Build a file set from files in order.
    pub fn from_files(files: impl IntoIterator<Item = SourceFile>) -> Self {
        let mut set = FileSet::new();
        for file in files {
            set.push(file);
        }
        set
    }

    /// Append a file. Include files register their parent directory.
    pub fn push(&mut self, file: SourceFile) {
        if file.is_include_file {
            let dir = file
                .path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            self.add_include_dir(dir);
        }
        self.files.push(file);
    }

    /// Register an include directory. Duplicates keep their first position.
    pub fn add_include_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.include_dirs.contains(&dir) {
            self.include_dirs.push(dir);
        }
    }

    /// Builder-style variant of [`FileSet::add_include_dir`].
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.add_include_dir(dir);
        self
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
