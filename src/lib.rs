pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod file_set;
pub mod module;
pub mod project;
pub mod tool;
pub mod workdir;

pub use command::AnalysisCommand;
pub use config::AnalysisConfig;
pub use error::Error;
pub use file_set::FileSet;
pub use module::{IwyuModule, Module, RunReport};
pub use project::{CompileUnit, Project, Toolchain};
pub use workdir::PushDir;

pub type Result<T> = std::result::Result<T, Error>;
