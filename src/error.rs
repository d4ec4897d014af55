use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal scan failures. Anything that only affects a single child entry is
/// skipped at the point it occurs and never reaches this type.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan target itself could not be stat'ed.
    #[error("cannot access {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    /// The scan target is a directory that could not be enumerated.
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    /// The scan worker died without delivering a result.
    #[error("scan worker disconnected while loading {}", path.display())]
    WorkerGone { path: PathBuf },
}

/// Failures while opening or executing a selected file. Reported on the
/// status line only; navigation state is never touched.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("cannot access {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("failed to start {command} for {}: {source}", path.display())]
    Spawn {
        command: String,
        path: PathBuf,
        source: io::Error,
    },
}
