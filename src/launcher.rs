use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::LaunchError;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    false
}

/// Open or run the selected file, detached from the UI. Files with an execute
/// bit start directly, everything else goes through the desktop opener. The
/// child runs in the file's directory with its stdio nulled so it cannot
/// write into the raw-mode terminal.
pub fn launch(path: &Path) -> Result<(), LaunchError> {
    let metadata = fs::metadata(path).map_err(|source| LaunchError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    let mut command = if is_executable(&metadata) {
        Command::new(path)
    } else {
        let mut opener = Command::new(OPENER);
        opener.arg(path);
        opener
    };

    if let Some(parent) = path.parent() {
        command.current_dir(parent);
    }

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
        .map_err(|source| LaunchError::Spawn {
            command: command.get_program().to_string_lossy().into_owned(),
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_stat_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = launch(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, LaunchError::Stat { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn exec_bit_detection() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();

        fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!is_executable(&fs::metadata(&script).unwrap()));

        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(is_executable(&fs::metadata(&script).unwrap()));
    }

    #[cfg(unix)]
    #[test]
    fn executable_runs_in_its_own_directory() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::{Duration, Instant};

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("mark.sh");
        fs::write(&script, "#!/bin/sh\necho done > marker.txt\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        launch(&script).unwrap();

        // The child writes relative to its cwd, which must be the script's
        // directory.
        let marker = dir.path().join("marker.txt");
        let deadline = Instant::now() + Duration::from_secs(5);
        while !marker.exists() {
            assert!(Instant::now() < deadline, "spawned script never ran");
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}
