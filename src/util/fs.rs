//! Filesystem utilities.

use std::path::{Path, PathBuf};

/// Make `path` absolute by joining it onto `base` if it is relative.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Resolve symlinks and `..` when the path exists.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Check if a path is inside another path.
pub fn is_inside(path: &Path, parent: &Path) -> bool {
    normalize_path(path).starts_with(normalize_path(parent))
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_from_work_root() {
        let rel = relative_path(Path::new("/proj/build/design"), Path::new("/proj/rtl/top.v"));
        assert_eq!(rel, PathBuf::from("../../rtl/top.v"));
    }

    #[test]
    fn test_is_inside_resolves_dot_dot() {
        let tmp = tempfile::TempDir::new().unwrap();
        let project = tmp.path().join("proj");
        std::fs::create_dir_all(&project).unwrap();

        assert!(is_inside(&project, &project.join(".")));
        assert!(is_inside(&project, &project.join("..")));
        assert!(!is_inside(&project, &project.join("build")));
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize(Path::new("/proj"), Path::new("rtl/top.v")),
            PathBuf::from("/proj/rtl/top.v")
        );
        assert_eq!(
            absolutize(Path::new("/proj"), Path::new("/abs/top.v")),
            PathBuf::from("/abs/top.v")
        );
    }
}
