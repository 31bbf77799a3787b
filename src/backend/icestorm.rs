//! Project IceStorm backend: yosys → arachne-pnr → icepack, driven by make.
//!
//! `configure` writes three files into the work root:
//!
//! - `Makefile`: static rule chain `.ys → .blif → .txt → .bin` plus `clean`
//! - `<name>.ys`: yosys synthesis script
//! - `config.mk`: target name, PCF file and arachne-pnr options
//!
//! The statement order in the yosys script matters: defaults are pushed
//! before any source is read, parameters are applied after all sources and
//! synthesis runs last.

use std::path::PathBuf;

use crate::backend::error::{BackendError, ConfigurationError, Stage};
use crate::backend::lifecycle::{self, PipelineRunner};
use crate::backend::registry::BackendId;
use crate::backend::trait_def::{Backend, BackendArgs, BuildResult, ConfigureResult};
use crate::core::{BuildDescription, BuildIdentity, FileSet, FileType, ParameterOverrides};

/// Pipeline description. Independent of the build identity.
pub const MAKEFILE_TEMPLATE: &str = "\
#Auto generated by edaflow
include config.mk

all: $(TARGET).bin

%.blif: %.ys
\tyosys -q -s $?
%.txt: $(PCF_FILE) %.blif
\tarachne-pnr $(ARACHNE_PNR_OPTIONS) -q -p $? -o $@
%.bin: %.txt
\ticepack $< $@

clean:
\trm -f $(TARGET).blif $(TARGET).txt $(TARGET).bin
";

/// Variables consumed by [`MAKEFILE_TEMPLATE`].
pub const CONFIG_MK_TEMPLATE: &str = "\
#Auto generated by edaflow
TARGET   := {target}
PCF_FILE := {pcf_file}
ARACHNE_PNR_OPTIONS := {arachne_pnr_options}
";

/// Tool option holding extra arachne-pnr flags.
pub const ARACHNE_PNR_OPTIONS: &str = "arachne_pnr_options";

const MAKEFILE: &str = "Makefile";
const CONFIG_MK: &str = "config.mk";

/// Substitute `{key}` placeholders in a template.
///
/// The template is scanned once, so substituted values are never rescanned.
/// Unknown placeholders are left as they are.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let found = tail.find('}').and_then(|end| {
            let key = &tail[..end];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, *value))
        });
        match found {
            Some((end, value)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// A rendered yosys script and the constraint files found while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisScript {
    pub text: String,
    pub constraint_files: Vec<String>,
}

/// Render the yosys script for a build.
///
/// HDL files become `read_verilog` statements in file-set order. Constraint
/// files are collected instead of emitted. Include files and other types are
/// skipped.
pub fn render_synthesis_script(
    identity: &BuildIdentity,
    fileset: &FileSet,
    parameters: &ParameterOverrides,
) -> SynthesisScript {
    let mut lines = vec![
        "verilog_defaults -push".to_string(),
        "verilog_defaults -add -defer".to_string(),
    ];

    if !fileset.include_dirs().is_empty() {
        let flags: Vec<String> = fileset
            .include_dirs()
            .iter()
            .map(|dir| format!("-I{}", dir.display()))
            .collect();
        lines.push(format!("verilog_defaults -add {}", flags.join(" ")));
    }

    let mut constraint_files = Vec::new();
    for file in fileset.files().iter().filter(|f| !f.is_include_file()) {
        match file.file_type() {
            FileType::Hdl => lines.push(format!("read_verilog {}", file.display_path())),
            FileType::ConstraintFile => constraint_files.push(file.display_path()),
            FileType::Other(_) => {}
        }
    }

    let toplevel = identity.toplevel().unwrap_or_default();
    for (name, value) in parameters.iter() {
        lines.push(format!(
            "chparam -set {} {} $abstract\\{}",
            name,
            value.to_literal(true),
            toplevel
        ));
    }

    lines.push("verilog_defaults -pop".to_string());

    let mut synth = format!("synth_ice40 -blif {}.blif", identity.name());
    if let Some(top) = identity.toplevel() {
        synth.push_str(&format!(" -top {}", top));
    }
    lines.push(synth);

    let mut text = lines.join("\n");
    text.push('\n');

    SynthesisScript {
        text,
        constraint_files,
    }
}

/// The single constraint file a build must have.
pub fn single_constraint_file(files: &[String]) -> Result<&str, ConfigurationError> {
    match files {
        [] => Err(ConfigurationError::MissingConstraintFile),
        [only] => Ok(only.as_str()),
        _ => Err(ConfigurationError::MultipleConstraintFiles {
            files: files.to_vec(),
        }),
    }
}

/// IceStorm toolchain backend.
#[derive(Debug, Clone)]
pub struct IcestormBackend {
    description: BuildDescription,
    runner: PipelineRunner,
}

impl IcestormBackend {
    /// Create a backend that runs `make` from PATH.
    pub fn new(description: BuildDescription) -> Self {
        IcestormBackend {
            description,
            runner: PipelineRunner::system(),
        }
    }

    /// Use a different pipeline runner.
    pub fn with_runner(mut self, runner: PipelineRunner) -> Self {
        self.runner = runner;
        self
    }

    fn config_mk(&self, pcf_file: &str) -> String {
        let options = self.description.tool_options.joined(ARACHNE_PNR_OPTIONS);
        render_template(
            CONFIG_MK_TEMPLATE,
            &[
                ("target", self.description.identity.name()),
                ("pcf_file", pcf_file),
                ("arachne_pnr_options", &options),
            ],
        )
    }
}

impl Backend for IcestormBackend {
    fn id(&self) -> BackendId {
        BackendId::Icestorm
    }

    fn identity(&self) -> &BuildIdentity {
        &self.description.identity
    }

    fn configure(&self, _args: &BackendArgs) -> Result<ConfigureResult, BackendError> {
        let id = self.id();
        let identity = self.identity();
        lifecycle::prepare_work_root(id, identity)?;

        let mut result = ConfigureResult::default();
        result
            .artifacts
            .push(lifecycle::write_artifact(id, identity, MAKEFILE, MAKEFILE_TEMPLATE)?);

        let script = render_synthesis_script(
            identity,
            &self.description.fileset,
            &self.description.parameters,
        );
        let script_name = format!("{}.ys", identity.name());
        result
            .artifacts
            .push(lifecycle::write_artifact(id, identity, &script_name, &script.text)?);

        // The script stays on disk if this check fails.
        let pcf_file = single_constraint_file(&script.constraint_files)
            .map_err(|error| BackendError::Configuration { backend: id, error })?;

        result
            .artifacts
            .push(lifecycle::write_artifact(id, identity, CONFIG_MK, &self.config_mk(pcf_file))?);

        Ok(result)
    }

    fn build(&self, args: &BackendArgs) -> Result<BuildResult, BackendError> {
        let identity = self.identity();
        lifecycle::begin_build(self.id(), identity);

        let cmd = self.runner.command(identity.work_root(), args, &[]);
        lifecycle::run_pipeline(self.id(), Stage::Build, &self.runner, &cmd, args)?;

        Ok(BuildResult {
            output: identity.artifact_path("bin"),
        })
    }

    fn done(&self, _args: &BackendArgs) {
        let identity = self.identity();
        lifecycle::report_done(identity, &identity.artifact_path("bin"));
    }

    fn clean(&self, args: &BackendArgs) -> Result<(), BackendError> {
        let identity = self.identity();
        let cmd = self.runner.command(identity.work_root(), args, &["clean"]);
        lifecycle::run_pipeline(self.id(), Stage::Clean, &self.runner, &cmd, args)?;
        Ok(())
    }

    fn generated_files(&self) -> Vec<PathBuf> {
        let identity = self.identity();
        let mut files = vec![
            identity.work_root().join(MAKEFILE),
            identity.work_root().join(CONFIG_MK),
        ];
        files.extend(
            ["ys", "blif", "txt", "bin"]
                .iter()
                .map(|ext| identity.artifact_path(ext)),
        );
        files
    }
}
