use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// One source file's build description: its input path and the full compiler
/// invocation the build would use for it.
#[derive(Debug, Clone)]
pub struct CompileUnit {
    input: PathBuf,
    compiler: String,
    compile_string: String,
}

impl CompileUnit {
    pub fn new(
        input: impl Into<PathBuf>,
        compiler: impl Into<String>,
        compile_string: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            compiler: compiler.into(),
            compile_string: compile_string.into(),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    /// The compiler path as it appears at the front of the compile string.
    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    pub fn compile_string(&self) -> &str {
        &self.compile_string
    }
}

/// Derives a compile invocation for files the database has no entry for
/// (headers picked up by a scan, mostly).
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub compiler: String,
    pub flags: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            compiler: "c++".to_string(),
            flags: String::new(),
        }
    }
}

impl Toolchain {
    pub fn new(compiler: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            flags: flags.into(),
        }
    }

    /// Seed a toolchain from one database command: everything between the
    /// compiler name and the output clause, minus the entry's own input file.
    fn from_command(command: &str, compiler: &str, file: &str) -> Self {
        let stripped = &command[compiler.len()..];
        let flags_part = match stripped.rfind(" -o") {
            Some(pos) => &stripped[..pos],
            None => stripped,
        };
        let flags = flags_part
            .split_whitespace()
            .filter(|token| *token != file)
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(compiler, flags)
    }

    pub fn unit_for(&self, file: &Path) -> CompileUnit {
        let input = file.display();
        let compile_string = if self.flags.is_empty() {
            format!("{} {} -o {}.o", self.compiler, input, input)
        } else {
            format!("{} {} {} -o {}.o", self.compiler, self.flags, input, input)
        };
        CompileUnit::new(file, self.compiler.clone(), compile_string)
    }
}

#[derive(Debug, Deserialize)]
struct DatabaseEntry {
    directory: PathBuf,
    file: PathBuf,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    arguments: Option<Vec<String>>,
}

/// The project handle this extension consumes: root directory, compilation
/// database keyed by source type, and a toolchain for everything else.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    database: BTreeMap<String, Vec<CompileUnit>>,
    toolchain: Toolchain,
}

impl Project {
    pub fn new(
        root: impl Into<PathBuf>,
        database: BTreeMap<String, Vec<CompileUnit>>,
        toolchain: Toolchain,
    ) -> Self {
        Self {
            root: root.into(),
            database,
            toolchain,
        }
    }

    /// Load a project from a clang-style `compile_commands.json`.
    ///
    /// Each entry's file is resolved against its directory, units are grouped
    /// by extension, and the toolchain is seeded from the first entry.
    pub fn load(root: impl Into<PathBuf>, database_path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(database_path)?;
        let entries: Vec<DatabaseEntry> =
            serde_json::from_str(&raw).map_err(|source| Error::Database {
                path: database_path.to_path_buf(),
                source,
            })?;

        let mut database: BTreeMap<String, Vec<CompileUnit>> = BTreeMap::new();
        let mut toolchain = None;

        for entry in entries {
            let command = match (entry.command, entry.arguments) {
                (Some(command), _) => command,
                (None, Some(arguments)) => arguments.join(" "),
                (None, None) => continue,
            };
            let Some(compiler) = command.split_whitespace().next() else {
                continue;
            };
            let compiler = compiler.to_string();

            if toolchain.is_none() {
                toolchain = Some(Toolchain::from_command(
                    &command,
                    &compiler,
                    &entry.file.to_string_lossy(),
                ));
            }

            let input = if entry.file.is_absolute() {
                entry.file
            } else {
                entry.directory.join(entry.file)
            };
            let source_type = input
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .to_string();
            database
                .entry(source_type)
                .or_default()
                .push(CompileUnit::new(input, compiler, command));
        }

        Ok(Self {
            root: root.into(),
            database,
            toolchain: toolchain.unwrap_or_default(),
        })
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn database(&self) -> &BTreeMap<String, Vec<CompileUnit>> {
        &self.database
    }

    /// The compile unit for one file: its database entry when the build knows
    /// the file, a toolchain-derived invocation otherwise.
    pub fn compile_unit(&self, file: &Path) -> CompileUnit {
        for units in self.database.values() {
            if let Some(unit) = units.iter().find(|unit| unit.input() == file) {
                return unit.clone();
            }
        }
        self.toolchain.unit_for(file)
    }
}
