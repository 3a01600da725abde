use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::{Error, Result};

/// Candidate executable names, in resolution order. Both are the same tool;
/// distributions disagree on which name they install.
pub const CANDIDATES: &[&str] = &["iwyu", "include-what-you-use"];

/// Find an installed include-what-you-use binary on the search path.
pub fn find_iwyu() -> Result<PathBuf> {
    find_in(env::var_os("PATH"))
}

fn find_in(search_path: Option<OsString>) -> Result<PathBuf> {
    let cwd = env::current_dir()?;
    for name in CANDIDATES {
        if let Ok(found) = which::which_in(name, search_path.as_ref(), &cwd) {
            return Ok(found);
        }
    }
    Err(Error::ToolNotFound {
        candidates: CANDIDATES.join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn install_fake(dir: &TempDir, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.path().join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn resolves_first_candidate_found() {
        let dir = TempDir::new().unwrap();
        let expected = install_fake(&dir, "include-what-you-use");
        let found = find_in(Some(dir.path().into())).unwrap();
        assert_eq!(found, expected);
    }

    #[cfg(unix)]
    #[test]
    fn short_name_takes_priority() {
        let dir = TempDir::new().unwrap();
        install_fake(&dir, "include-what-you-use");
        let expected = install_fake(&dir, "iwyu");
        let found = find_in(Some(dir.path().into())).unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn missing_tool_reports_candidates_tried() {
        let dir = TempDir::new().unwrap();
        let err = find_in(Some(dir.path().into())).unwrap_err();
        match err {
            Error::ToolNotFound { candidates } => {
                assert!(candidates.contains("iwyu"));
                assert!(candidates.contains("include-what-you-use"));
            }
            other => panic!("expected ToolNotFound, got {other:?}"),
        }
    }
}
