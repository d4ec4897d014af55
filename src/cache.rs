use dashmap::DashMap;
use jwalk::WalkDir;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Dotfile check applied at every level of every scan and walk.
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Process-lifetime memo of cumulative subtree sizes.
///
/// Totals are computed once per path and never invalidated, so revisiting a
/// directory is instant at the cost of staleness when the tree changes
/// underneath a running session.
pub struct SizeCache {
    sizes: DashMap<PathBuf, u64>,
    computations: AtomicU64,
}

impl SizeCache {
    pub fn new() -> Self {
        Self {
            sizes: DashMap::new(),
            computations: AtomicU64::new(0),
        }
    }

    /// Cumulative size in bytes of all non-hidden files under `path`.
    ///
    /// The first call per path walks the subtree; later calls return the
    /// memoized total without touching the filesystem. The walk runs outside
    /// the map lock: concurrent calls for the same uncached path may both
    /// walk (they produce the same total), and calls for different paths
    /// never wait on each other.
    pub fn get(&self, path: &Path) -> u64 {
        if let Some(size) = self.sizes.get(path) {
            return *size;
        }

        let total = self.walk_total(path);
        self.sizes.insert(path.to_path_buf(), total);
        total
    }

    /// Number of subtree walks performed so far.
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    fn walk_total(&self, path: &Path) -> u64 {
        self.computations.fetch_add(1, Ordering::Relaxed);

        let walker = WalkDir::new(path)
            .skip_hidden(false)
            .parallelism(jwalk::Parallelism::RayonNewPool(Self::walk_parallelism()))
            .process_read_dir(|_, _, _, children| {
                children.retain(|entry| {
                    entry
                        .as_ref()
                        .map(|dir_entry| !is_hidden_name(&dir_entry.file_name))
                        .unwrap_or(true)
                });
            });

        // Unreadable entries contribute nothing; an unreadable root walks to 0.
        let mut total = 0u64;
        for entry in walker {
            let Ok(entry) = entry else { continue };
            let Ok(metadata) = entry.metadata() else { continue };
            if !metadata.is_dir() {
                total = total.saturating_add(metadata.len());
            }
        }
        total
    }

    fn walk_parallelism() -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        cores.clamp(2, 16)
    }
}

impl Default for SizeCache {
    fn default() -> Self {
        Self::new()
    }
}
