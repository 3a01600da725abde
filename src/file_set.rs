use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::config::AnalysisConfig;
use crate::project::Project;
use crate::{Error, Result};

/// The deduplicated set of absolute paths to check. A file known to both the
/// database and a scan path contributes one entry.
pub type FileSet = BTreeSet<PathBuf>;

/// Merge database inputs and scanned directory entries, filtered by the
/// active extension set.
///
/// Scan paths are enumerated one level deep: entries of the directory itself
/// plus entries of its immediate subdirectories, nothing deeper. Entries with
/// no `.` in their name are skipped.
pub fn resolve(project: &Project, config: &AnalysisConfig) -> Result<FileSet> {
    let extensions = config.active_extensions();
    let mut files = FileSet::new();

    for (source_type, units) in project.database() {
        if !extensions.contains(source_type.as_str()) {
            continue;
        }
        for unit in units {
            files.insert(unit.input().to_path_buf());
        }
    }

    if let Some(scan_paths) = &config.scan_paths {
        for path in scan_paths {
            if !path.is_dir() {
                return Err(Error::ScanDirMissing { path: path.clone() });
            }
            for entry in WalkDir::new(path).min_depth(1).max_depth(2) {
                let entry = entry.map_err(io::Error::from)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy();
                let Some(dot) = name.rfind('.') else {
                    continue;
                };
                if extensions.contains(&name.as_ref()[dot + 1..]) {
                    files.insert(entry.path().canonicalize()?);
                }
            }
        }
    }

    Ok(files)
}
