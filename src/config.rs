use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Keys a configuration table may contain; anything else is fatal.
pub const RECOGNIZED_KEYS: &[&str] = &[
    "extra_args",
    "include_dirs",
    "forced_headers",
    "ignore_substring",
    "scan_paths",
    "extension_filter",
];

/// Extensions checked when no `extension_filter` is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["cpp", "cxx", "cc", "h", "hpp"];

pub const DEFAULT_CONFIG_FILE: &str = "iwyu-runner.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Arguments passed through to the tool verbatim.
    pub extra_args: Option<String>,
    /// Directories appended as `-I` flags.
    pub include_dirs: Option<Vec<String>>,
    /// Verbatim text appended to every invocation, e.g. forced includes.
    pub forced_headers: Option<String>,
    /// Files whose path contains this substring are skipped entirely.
    pub ignore_substring: Option<String>,
    /// Extra directories scanned (one level deep) for sources and headers.
    pub scan_paths: Option<Vec<PathBuf>>,
    /// Extensions eligible for checking; defaults to `DEFAULT_EXTENSIONS`.
    pub extension_filter: Option<Vec<String>>,
}

impl AnalysisConfig {
    /// Load config from the project root, falling back to defaults if no
    /// config file is present there
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            println!("📝 Loading configuration from: {}", path.display());
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a raw TOML table, rejecting unrecognized keys before
    /// deserializing
    pub fn from_toml(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        validate_keys(&table)?;
        Ok(table.try_into()?)
    }

    /// The active extension filter: configured set if present, built-in
    /// defaults otherwise.
    pub fn active_extensions(&self) -> BTreeSet<&str> {
        match &self.extension_filter {
            Some(exts) => exts.iter().map(String::as_str).collect(),
            None => DEFAULT_EXTENSIONS.iter().copied().collect(),
        }
    }

    /// Whether the ignore filter excludes this file.
    pub fn ignores(&self, file: &Path) -> bool {
        self.ignore_substring
            .as_deref()
            .is_some_and(|pattern| file.to_string_lossy().contains(pattern))
    }

    /// Create a config file with all available options documented
    pub fn create_documented_config() -> String {
        format!(
            r#"# iwyu-runner configuration file
# Controls which files are checked and what each invocation carries

# Arguments passed through to the tool verbatim
# extra_args = "-Xiwyu --mapping_file=iwyu.imp"

# Include directories appended as -I flags
# include_dirs = ["include", "third_party/include"]

# Verbatim text appended to every invocation, e.g. headers to force-include
# forced_headers = "-include config.h"

# Skip any file whose path contains this substring
# ignore_substring = "/generated/"

# Extra directories to scan for sources and headers (one level deep)
# scan_paths = ["include", "src"]

# File extensions eligible for checking (defaults shown)
# extension_filter = ["cpp", "cxx", "cc", "h", "hpp"]
"#
        )
    }
}

/// Verify every key in the raw table is recognized; fatal on the first
/// unknown key, before any file is touched.
pub fn validate_keys(table: &toml::Table) -> Result<()> {
    for key in table.keys() {
        if !RECOGNIZED_KEYS.contains(&key.as_str()) {
            return Err(Error::UnknownKey { key: key.clone() });
        }
    }
    Ok(())
}
