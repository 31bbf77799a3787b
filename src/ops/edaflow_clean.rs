//! Implementation of `edaflow clean`.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::backend::lifecycle::remove_generated;
use crate::ops::session::Session;
use crate::util::fs::is_inside;

/// Options for the clean command.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Delete every generated file instead of running the clean rule
    pub all: bool,
}

/// What a clean did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
    /// No generated files were found
    NothingToClean,

    /// The pipeline's clean rule ran
    CleanRule,

    /// Generated files were deleted directly
    Removed(Vec<PathBuf>),
}

/// Remove derived artifacts.
///
/// A fully configured work root is cleaned through the pipeline's clean
/// rule. A work root left behind by a failed configure has no `config.mk`,
/// so the pipeline cannot run and the generated files are deleted directly.
/// `all` always deletes them directly. Only files the backend generates are
/// ever removed.
pub fn clean(session: &Session, opts: &CleanOptions) -> Result<CleanOutcome> {
    let work_root = session.work_root();
    let backend = session.backend();
    let name = session.project().name();

    let configured = work_root.join("Makefile").is_file() && work_root.join("config.mk").is_file();
    if configured && !opts.all {
        backend
            .clean(session.args())
            .with_context(|| format!("failed to clean `{}`", name))?;
        return Ok(CleanOutcome::CleanRule);
    }

    let removed = remove_generated(backend.id(), &backend.generated_files())
        .with_context(|| format!("failed to clean `{}`", name))?;
    if opts.all {
        remove_empty_work_root(session)?;
    }

    if removed.is_empty() {
        tracing::info!("Nothing to clean in {}", work_root.display());
        return Ok(CleanOutcome::NothingToClean);
    }
    Ok(CleanOutcome::Removed(removed))
}

/// Delete the work root once it is empty, unless it holds the project.
fn remove_empty_work_root(session: &Session) -> Result<()> {
    let work_root = session.work_root();
    if !work_root.is_dir() || is_inside(session.project().root(), work_root) {
        return Ok(());
    }

    let mut entries = std::fs::read_dir(work_root)
        .with_context(|| format!("failed to read {}", work_root.display()))?;
    if entries.next().is_none() {
        std::fs::remove_dir(work_root)
            .with_context(|| format!("failed to remove {}", work_root.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use super::*;
    use crate::ops::configure;
    use crate::ops::session::{open_session_with, SessionOptions};
    use crate::test_support::{minimal_manifest, MockLauncher, MockProcessOutput};
    use crate::util::GlobalContext;
    use tempfile::TempDir;

    fn open(root: &Path, manifest: &str, launcher: Arc<MockLauncher>) -> Session {
        std::fs::write(root.join("Edaflow.toml"), manifest).unwrap();
        let ctx = GlobalContext::with_cwd(root.to_path_buf())
            .unwrap()
            .with_home(root.join("home"));
        open_session_with(&ctx, &SessionOptions::default(), launcher).unwrap()
    }

    #[test]
    fn test_clean_runs_clean_rule_when_configured() {
        let tmp = TempDir::new().unwrap();
        let launcher = Arc::new(MockLauncher::new());
        launcher.expect("make clean", MockProcessOutput::success(""));
        let session = open(tmp.path(), &minimal_manifest("blinky"), launcher.clone());

        assert_eq!(
            clean(&session, &CleanOptions::default()).unwrap(),
            CleanOutcome::NothingToClean
        );
        assert!(launcher.calls().is_empty());

        configure(&session).unwrap();
        assert_eq!(
            clean(&session, &CleanOptions::default()).unwrap(),
            CleanOutcome::CleanRule
        );
        assert_eq!(launcher.calls()[0].command, "make clean");
    }

    #[test]
    fn test_clean_after_failed_configure() {
        let tmp = TempDir::new().unwrap();
        let launcher = Arc::new(MockLauncher::new());
        let manifest =
            "[project]\nname = \"bare\"\n\n[[files]]\npath = \"top.v\"\nfile-type = \"verilogSource\"\n";
        let session = open(tmp.path(), manifest, launcher.clone());

        assert!(configure(&session).is_err());
        let work_root = session.work_root().to_path_buf();
        assert!(work_root.join("Makefile").exists());

        let outcome = clean(&session, &CleanOptions::default()).unwrap();
        assert_eq!(
            outcome,
            CleanOutcome::Removed(vec![work_root.join("Makefile"), work_root.join("bare.ys")])
        );
        assert!(!work_root.join("Makefile").exists());
        assert!(!work_root.join("bare.ys").exists());
        // The pipeline was never run.
        assert!(launcher.calls().is_empty());
    }

    #[test]
    fn test_clean_all_with_project_as_work_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("proj");
        std::fs::create_dir_all(root.join("rtl")).unwrap();
        std::fs::write(root.join("rtl/top.v"), "module top; endmodule\n").unwrap();
        std::fs::write(root.join("pins.pcf"), "set_io clk 21\n").unwrap();
        let manifest = minimal_manifest("blinky").replace(
            "toplevel = \"top\"\n",
            "toplevel = \"top\"\nwork-root = \".\"\n",
        );
        let session = open(&root, &manifest, Arc::new(MockLauncher::new()));

        configure(&session).unwrap();
        let outcome = clean(&session, &CleanOptions { all: true }).unwrap();

        assert!(matches!(outcome, CleanOutcome::Removed(ref files) if files.len() == 3));
        assert!(root.is_dir());
        assert!(root.join("Edaflow.toml").exists());
        assert!(root.join("rtl/top.v").exists());
        assert!(root.join("pins.pcf").exists());
        assert!(!root.join("Makefile").exists());
        assert!(!root.join("config.mk").exists());
    }

    #[test]
    fn test_clean_all_removes_empty_work_root() {
        let tmp = TempDir::new().unwrap();
        let session = open(tmp.path(), &minimal_manifest("blinky"), Arc::new(MockLauncher::new()));

        configure(&session).unwrap();
        std::fs::write(session.work_root().join("blinky.bin"), "bits").unwrap();
        clean(&session, &CleanOptions { all: true }).unwrap();

        assert!(!session.work_root().exists());
        assert!(tmp.path().join("Edaflow.toml").exists());
    }
}
