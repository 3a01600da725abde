use std::path::PathBuf;

use crate::config::AnalysisConfig;
use crate::project::Project;
use crate::workdir::PushDir;
use crate::{command, executor, file_set, tool, Result};

/// What a run did: files handed to the tool and files the ignore filter
/// skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunReport {
    pub checked: usize,
    pub skipped: usize,
}

/// The extension surface the host drives: one operation over an immutable
/// project view and configuration.
pub trait Module {
    fn run(&self, project: &Project, config: &AnalysisConfig) -> Result<RunReport>;
}

/// Runs include-what-you-use over every resolved file, one at a time, from
/// the project root.
#[derive(Debug, Default)]
pub struct IwyuModule {
    binary: Option<PathBuf>,
}

impl IwyuModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this binary instead of resolving one from the search path.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = Some(binary.into());
        self
    }
}

impl Module for IwyuModule {
    fn run(&self, project: &Project, config: &AnalysisConfig) -> Result<RunReport> {
        let _guard = PushDir::change(project.root())?;

        let files = file_set::resolve(project, config)?;
        let binary = match &self.binary {
            Some(binary) => binary.clone(),
            None => tool::find_iwyu()?,
        };

        let mut report = RunReport::default();
        for file in &files {
            let unit = project.compile_unit(file);
            match command::synthesize(&binary, &unit, config, file) {
                Some(cmd) => {
                    executor::execute(&cmd)?;
                    report.checked += 1;
                }
                None => report.skipped += 1,
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{CompileUnit, Toolchain};
    use crate::test_support::cwd_lock;
    use crate::Error;
    use std::collections::BTreeMap;
    use std::env;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn install_logging_tool(dir: &Path, log: &Path, exit_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("fake-iwyu");
        fs::write(
            &path,
            format!("#!/bin/sh\necho \"$@\" >> {}\nexit {}\n", log.display(), exit_code),
        )
        .unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn database_of(units: Vec<CompileUnit>) -> BTreeMap<String, Vec<CompileUnit>> {
        let mut database = BTreeMap::new();
        database.insert("cpp".to_string(), units);
        database
    }

    #[cfg(unix)]
    #[test]
    fn tool_failures_do_not_stop_the_batch() {
        let _serial = cwd_lock();
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("invocations.log");
        let binary = install_logging_tool(dir.path(), &log, 2);

        let a = dir.path().join("a.cpp");
        let b = dir.path().join("b.cpp");
        let units = [&a, &b]
            .iter()
            .map(|path| {
                let p = path.display();
                CompileUnit::new(path.as_path(), "g++", format!("g++ -DX {p} -o {p}.o"))
            })
            .collect();
        let project = Project::new(dir.path(), database_of(units), Toolchain::default());

        let report = IwyuModule::new()
            .with_binary(&binary)
            .run(&project, &AnalysisConfig::default())
            .unwrap();

        assert_eq!(report.checked, 2);
        let invocations = fs::read_to_string(&log).unwrap();
        assert_eq!(invocations.lines().count(), 2);
        assert!(invocations.contains("-DX"));
    }

    #[test]
    fn ignored_files_never_reach_the_executor() {
        let _serial = cwd_lock();
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("generated").join("a.cpp");
        let units = vec![CompileUnit::new(
            file.as_path(),
            "g++",
            format!("g++ {} -o a.o", file.display()),
        )];
        let project = Project::new(dir.path(), database_of(units), Toolchain::default());
        let config = AnalysisConfig {
            ignore_substring: Some("generated".to_string()),
            ..Default::default()
        };

        // A nonexistent binary would make any execution attempt fatal.
        let report = IwyuModule::new()
            .with_binary("/no/such/binary")
            .run(&project, &config)
            .unwrap();
        assert_eq!(report.checked, 0);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn fatal_errors_restore_the_working_directory() {
        let _serial = cwd_lock();
        let before = env::current_dir().unwrap();
        let dir = TempDir::new().unwrap();
        let project = Project::new(dir.path(), BTreeMap::new(), Toolchain::default());
        let config = AnalysisConfig {
            scan_paths: Some(vec![PathBuf::from("no-such-dir")]),
            ..Default::default()
        };

        let err = IwyuModule::new()
            .with_binary("/no/such/binary")
            .run(&project, &config)
            .unwrap_err();
        assert!(matches!(err, Error::ScanDirMissing { .. }));
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn empty_file_set_is_a_successful_noop() {
        let _serial = cwd_lock();
        let before = env::current_dir().unwrap();
        let dir = TempDir::new().unwrap();
        let project = Project::new(dir.path(), BTreeMap::new(), Toolchain::default());

        let report = IwyuModule::new()
            .with_binary("/no/such/binary")
            .run(&project, &AnalysisConfig::default())
            .unwrap();
        assert_eq!(report.checked, 0);
        assert_eq!(report.skipped, 0);
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
