//! Test fixtures for common backend scenarios.

use std::path::Path;

use crate::core::{BuildDescription, BuildIdentity, FileSet, SourceFile};

/// The smallest valid Icestorm file set: one HDL file and one PCF.
pub fn constrained_fileset() -> FileSet {
    FileSet::from_files([SourceFile::hdl("top.v"), SourceFile::constraint("pins.pcf")])
}

/// Description named `design` with toplevel `top`, building in `work_root`.
pub fn test_description(work_root: &Path, fileset: FileSet) -> BuildDescription {
    BuildDescription::new(
        BuildIdentity::new("design", work_root).with_toplevel("top"),
        fileset,
    )
}

/// Minimal `Edaflow.toml` for a design named `name`.
pub fn minimal_manifest(name: &str) -> String {
    format!(
        r#"[project]
name = "{name}"
toplevel = "top"

[[files]]
path = "rtl/top.v"
file-type = "verilogSource"

[[files]]
path = "pins.pcf"
file-type = "PCF"
"#
    )
}
