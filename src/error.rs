use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures abort the whole run; a non-zero exit from the tool itself
/// is handled inside the executor and never shows up here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unrecognized configuration key: {key}")]
    UnknownKey { key: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to find an include-what-you-use binary, check PATH (tried: {candidates})")]
    ToolNotFound { candidates: String },

    #[error("scan directory does not exist: {}", path.display())]
    ScanDirMissing { path: PathBuf },

    #[error("failed to parse compilation database {}: {source}", path.display())]
    Database {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to launch {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
