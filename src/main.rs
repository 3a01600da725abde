use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use iwyu_runner::{AnalysisConfig, IwyuModule, Module, Project, Toolchain};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "iwyu-runner")]
#[command(about = "Runs include-what-you-use across a project's compilation database")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a project's includes
    Check {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Compilation database (defaults to <path>/compile_commands.json)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Compiler used to derive invocations for files the database
        /// does not list
        #[arg(long)]
        compiler: Option<String>,

        /// Flags passed along with --compiler
        #[arg(long, default_value = "")]
        flags: String,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the config file
        #[arg(short, long, default_value = "iwyu-runner.toml")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check {
            path,
            database,
            config,
            compiler,
            flags,
        } => check_project(path, database, config, compiler, flags),
        Commands::Config { output } => generate_config(output),
    }
}

fn check_project(
    path: PathBuf,
    database: Option<PathBuf>,
    config_path: Option<PathBuf>,
    compiler: Option<String>,
    flags: String,
) -> anyhow::Result<()> {
    println!("🔎 include-what-you-use check");
    println!("🎯 Project root: {}", path.display());

    let start = Instant::now();

    let config = match config_path {
        Some(config_path) => AnalysisConfig::from_file(&config_path)
            .with_context(|| format!("loading config {}", config_path.display()))?,
        None => AnalysisConfig::load(&path)?,
    };

    let database_path = database.unwrap_or_else(|| path.join("compile_commands.json"));
    let mut project = if database_path.exists() {
        println!("🗂  Compilation database: {}", database_path.display());
        Project::load(&path, &database_path)
            .with_context(|| format!("loading database {}", database_path.display()))?
    } else if compiler.is_some() {
        Project::new(&path, BTreeMap::new(), Toolchain::default())
    } else {
        bail!(
            "no compilation database at {}; pass --database or --compiler",
            database_path.display()
        );
    };
    if let Some(compiler) = compiler {
        project = project.with_toolchain(Toolchain::new(compiler, flags));
    }

    let report = IwyuModule::new().run(&project, &config)?;

    println!(
        "\n✅ Checked {} files in {:.2}s ({} skipped)",
        report.checked,
        start.elapsed().as_secs_f64(),
        report.skipped
    );
    Ok(())
}

fn generate_config(output: PathBuf) -> anyhow::Result<()> {
    println!("📝 Generating configuration file: {}", output.display());
    std::fs::write(&output, AnalysisConfig::create_documented_config())?;
    println!("✅ Configuration file created successfully!");
    println!("💡 Edit the file to customize which files get checked.");
    Ok(())
}
