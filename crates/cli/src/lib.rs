mod index;

use clap::Parser;
use gogr_core::logging::{LogOptions, init_logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gogr",
    version,
    about = "Grep-friendly index of Go source files",
    long_about = "Prints one line per struct field, interface method, function or method \
                  signature, call expression and if/for header as <file>:<line>:<kind>: <text>. \
                  File names are taken from the arguments, or read from stdin one per line."
)]
pub struct Cli {
    /// Go files to index. Reads file names from stdin when empty.
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Warn about type declarations whose shape is not indexed
    #[arg(short, long)]
    pub debug: bool,

    /// Number of files processed concurrently (default: 2 × cores + 1)
    #[arg(short, long, value_name = "N", env = "GOGR_JOBS")]
    pub jobs: Option<usize>,

    /// Also write diagnostics to a daily rolling log file in this directory
    #[arg(long, value_name = "DIR", env = "GOGR_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = init_logging(&LogOptions {
        debug: cli.debug,
        log_dir: cli.log_dir.clone(),
    });

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(index::run(cli))
}
