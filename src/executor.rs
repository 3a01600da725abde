use std::process::Command;
use tracing::debug;

use crate::command::AnalysisCommand;
use crate::{Error, Result};

/// Run one synthesized invocation and wait for it.
///
/// A non-zero exit means the tool found something to report; its own output
/// is the signal, so the status is logged and dropped. Failing to launch the
/// binary at all is fatal.
pub fn execute(cmd: &AnalysisCommand) -> Result<()> {
    debug!(command = %cmd, "running includes check");
    let status = Command::new(cmd.program())
        .args(cmd.args())
        .status()
        .map_err(|source| Error::Spawn {
            program: cmd.program().to_path_buf(),
            source,
        })?;
    if !status.success() {
        debug!(code = ?status.code(), "tool exited non-zero");
    }
    Ok(())
}
