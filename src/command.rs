use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;
use crate::project::CompileUnit;

/// One ready-to-run tool invocation: the resolved binary plus its argv.
#[derive(Debug, Clone)]
pub struct AnalysisCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl AnalysisCommand {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for AnalysisCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Derive the tool invocation for one file from its compile string, or `None`
/// when the ignore filter excludes the file.
///
/// The compile string is reused rather than rebuilt so the tool sees the
/// exact defines, standard flags and search paths the project compiles with.
/// Only the compiler name at the front and the output clause at the back are
/// carved away; the `" -o"` marker assumption lives here and nowhere else.
pub fn synthesize(
    binary: &Path,
    unit: &CompileUnit,
    config: &AnalysisConfig,
    file: &Path,
) -> Option<AnalysisCommand> {
    if config.ignores(file) {
        return None;
    }

    let flags = carve_flags(unit.compile_string(), unit.compiler().len());
    let mut args: Vec<String> = flags.split_whitespace().map(str::to_string).collect();

    if let Some(extra) = &config.extra_args {
        args.extend(extra.split_whitespace().map(str::to_string));
    }
    if let Some(dirs) = &config.include_dirs {
        for dir in dirs {
            args.push(format!("-I{dir}"));
        }
    }
    if let Some(headers) = &config.forced_headers {
        args.extend(headers.split_whitespace().map(str::to_string));
    }
    args.push(file.display().to_string());

    Some(AnalysisCommand::new(binary, args))
}

/// Drop the compiler-name prefix and everything from the last `" -o"` on.
fn carve_flags(compile_string: &str, compiler_len: usize) -> &str {
    let stripped = &compile_string[compiler_len..];
    match stripped.rfind(" -o") {
        Some(pos) => &stripped[..pos],
        None => stripped,
    }
}
