use std::env;
use std::io;
use std::path::PathBuf;

use clap::Parser;

/// Set to exactly `false` to hide plain files from the listing. Their bytes
/// still count toward directory totals.
pub const SHOW_FILES_ENV: &str = "SPACESCOPE_SHOW_FILES";

#[derive(Parser, Debug)]
#[clap(
    name = "spacescope",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse disk usage interactively, largest entries first"
)]
pub struct Args {
    /// Directory to start browsing in
    #[clap(default_value = ".")]
    pub path: PathBuf,

    /// Print the shell commands that put this binary on PATH, then exit
    #[clap(long)]
    pub integrate: bool,
}

/// Settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub show_files: bool,
}

impl Config {
    /// Resolve the arguments against the filesystem and environment. The
    /// root is canonicalized so every path derived from it stays absolute.
    pub fn from_args(args: &Args) -> io::Result<Self> {
        let root = args.path.canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a directory: {}", root.display()),
            ));
        }

        Ok(Self {
            root,
            show_files: show_files_value(env::var(SHOW_FILES_ENV).ok().as_deref()),
        })
    }
}

/// Files are listed unless the variable is exactly `false`.
pub fn show_files_value(value: Option<&str>) -> bool {
    value != Some("false")
}
