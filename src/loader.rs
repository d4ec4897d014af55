use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::error::ScanError;
use crate::scanner::{Entry, Scanner};

#[derive(Debug)]
pub enum LoadState {
    Idle,
    Loading(PathBuf),
    Failed(ScanError),
}

struct LoadOutcome {
    result: Result<Entry, ScanError>,
}

/// One-slot request/response bridge between the UI loop and scan workers.
///
/// `request` is ignored while a load is in flight: no queuing, no
/// cancellation. Each accepted request spawns one worker that sends exactly
/// one outcome; `poll` consumes it without blocking the loop.
pub struct LoadController {
    scanner: Arc<Scanner>,
    show_files: bool,
    state: LoadState,
    rx: Option<Receiver<LoadOutcome>>,
}

impl LoadController {
    pub fn new(scanner: Arc<Scanner>, show_files: bool) -> Self {
        Self {
            scanner,
            show_files,
            state: LoadState::Idle,
            rx: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading(_))
    }

    pub fn request(&mut self, path: PathBuf) {
        if self.is_loading() {
            return;
        }

        let (tx, rx) = mpsc::channel::<LoadOutcome>();
        self.rx = Some(rx);
        self.state = LoadState::Loading(path.clone());

        let scanner = self.scanner.clone();
        let show_files = self.show_files;
        thread::spawn(move || {
            let result = scanner.scan(&path, show_files).map(|mut root| {
                root.percent = 100.0;
                root
            });
            let _ = tx.send(LoadOutcome { result });
        });
    }

    /// Drain the in-flight request if its outcome has arrived. Returns the
    /// new root on success; a failure parks the controller in
    /// `LoadState::Failed` until the next accepted request.
    pub fn poll(&mut self) -> Option<Entry> {
        let rx = self.rx.as_ref()?;

        match rx.try_recv() {
            Ok(outcome) => {
                self.rx = None;
                match outcome.result {
                    Ok(root) => {
                        self.state = LoadState::Idle;
                        Some(root)
                    }
                    Err(err) => {
                        self.state = LoadState::Failed(err);
                        None
                    }
                }
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Worker died without sending an outcome.
                self.rx = None;
                let path = match &self.state {
                    LoadState::Loading(path) => path.clone(),
                    _ => PathBuf::new(),
                };
                self.state = LoadState::Failed(ScanError::WorkerGone { path });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SizeCache;
    use crate::nav::{DrillRequest, NavigationState};
    use std::fs;
    use std::time::{Duration, Instant};

    fn controller(show_files: bool) -> LoadController {
        let scanner = Scanner::new(Arc::new(SizeCache::new()));
        LoadController::new(Arc::new(scanner), show_files)
    }

    fn poll_ready(controller: &mut LoadController) -> Option<Entry> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(root) = controller.poll() {
                return Some(root);
            }
            if matches!(controller.state(), LoadState::Failed(_)) {
                return None;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("load did not finish in time");
    }

    #[test]
    fn request_then_poll_delivers_the_scanned_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("data.bin"), vec![0u8; 32]).unwrap();

        let mut controller = controller(true);
        assert!(matches!(controller.state(), LoadState::Idle));

        controller.request(dir.path().to_path_buf());
        assert!(controller.is_loading());

        let root = poll_ready(&mut controller).unwrap();
        assert_eq!(root.size, 32);
        assert_eq!(root.percent, 100.0);
        assert!(matches!(controller.state(), LoadState::Idle));
    }

    #[test]
    fn failed_load_parks_until_a_fresh_request_recovers() {
        let dir = tempfile::tempdir().unwrap();

        let mut controller = controller(true);
        controller.request(dir.path().join("missing"));
        assert!(poll_ready(&mut controller).is_none());
        assert!(matches!(
            controller.state(),
            LoadState::Failed(ScanError::Stat { .. })
        ));

        // A later request leaves the failed state behind.
        controller.request(dir.path().to_path_buf());
        assert!(controller.is_loading());
        assert!(poll_ready(&mut controller).is_some());
        assert!(matches!(controller.state(), LoadState::Idle));
    }

    #[test]
    fn requests_while_loading_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("first")).unwrap();
        fs::create_dir(dir.path().join("second")).unwrap();

        let mut controller = controller(true);
        controller.request(dir.path().join("first"));
        // No poll has happened yet, so the controller is still loading and
        // must drop this request.
        controller.request(dir.path().join("second"));

        let root = poll_ready(&mut controller).unwrap();
        assert_eq!(root.path, dir.path().join("first"));
        assert!(matches!(controller.state(), LoadState::Idle));
        assert!(controller.poll().is_none());
    }

    #[test]
    fn drill_down_and_back_up_restores_the_original_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.bin"), vec![0u8; 10]).unwrap();

        let mut controller = controller(true);
        controller.request(dir.path().to_path_buf());
        let root = poll_ready(&mut controller).unwrap();
        let original_path = root.path.clone();
        let mut nav = NavigationState::new(root, 20, true);

        let sub_index = nav
            .visible()
            .iter()
            .position(|e| e.name == "sub")
            .unwrap();
        let Some(DrillRequest::Load(sub_path)) = nav.drill_into(sub_index) else {
            panic!("expected a load request for the subdirectory");
        };
        controller.request(sub_path);
        nav.apply_load_result(poll_ready(&mut controller).unwrap());
        assert_eq!(nav.root().path, dir.path().join("sub"));

        let Some(DrillRequest::Load(parent_path)) = nav.drill_up() else {
            panic!("expected a load request for the parent");
        };
        controller.request(parent_path);
        nav.apply_load_result(poll_ready(&mut controller).unwrap());
        assert_eq!(nav.root().path, original_path);
    }
}
