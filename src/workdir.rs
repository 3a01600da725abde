use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Scoped working-directory change: switches to `dir` on construction and
/// switches back when dropped, on every exit path.
#[derive(Debug)]
pub struct PushDir {
    previous: PathBuf,
}

impl PushDir {
    pub fn change(dir: &Path) -> io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir)?;
        Ok(Self { previous })
    }
}

impl Drop for PushDir {
    fn drop(&mut self) {
        // Nothing sane to do if the original directory is gone.
        let _ = env::set_current_dir(&self.previous);
    }
}
