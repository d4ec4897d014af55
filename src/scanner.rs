use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{is_hidden_name, SizeCache};
use crate::error::ScanError;

const PARENT_LINK_NAME: &str = "..";

/// One row of the browser: a directory or file with its cumulative size and
/// its share of the parent's total.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub percent: f64,
    pub is_dir: bool,
    pub depth: usize,
    pub children: Vec<Entry>,
}

impl Entry {
    pub fn file(path: PathBuf, size: u64) -> Self {
        Self {
            name: base_name(&path),
            path,
            size,
            percent: 0.0,
            is_dir: false,
            depth: 0,
            children: Vec::new(),
        }
    }

    pub fn directory(path: PathBuf, size: u64) -> Self {
        Self {
            name: base_name(&path),
            path,
            size,
            percent: 0.0,
            is_dir: true,
            depth: 0,
            children: Vec::new(),
        }
    }

    /// The synthetic `..` row linking to the parent directory. Never part of
    /// `children`; prepended to the visible list by the navigation layer.
    pub fn parent_link(parent: PathBuf) -> Self {
        Self {
            name: PARENT_LINK_NAME.to_string(),
            path: parent,
            size: 0,
            percent: 0.0,
            is_dir: true,
            depth: 0,
            children: Vec::new(),
        }
    }

    pub fn is_parent_link(&self) -> bool {
        self.name == PARENT_LINK_NAME
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Produces one-level listings, with every subdirectory total answered by the
/// shared cache.
pub struct Scanner {
    cache: Arc<SizeCache>,
}

impl Scanner {
    pub fn new(cache: Arc<SizeCache>) -> Self {
        Self { cache }
    }

    /// Scan one directory level.
    ///
    /// Children are sorted directories first, then files, each group largest
    /// first. Hidden entries are excluded entirely. File bytes count toward
    /// the total even when `show_files` is false and the files themselves are
    /// left out of the listing. An unreadable child is skipped; an unreadable
    /// `path` is the only failure.
    pub fn scan(&self, path: &Path, show_files: bool) -> Result<Entry, ScanError> {
        let metadata = fs::metadata(path).map_err(|source| ScanError::Stat {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_dir() {
            return Ok(Entry::file(path.to_path_buf(), metadata.len()));
        }

        let read_dir = fs::read_dir(path).map_err(|source| ScanError::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dir_paths = Vec::new();
        let mut files = Vec::new();
        let mut file_total = 0u64;

        for dirent in read_dir {
            let Ok(dirent) = dirent else { continue };
            if is_hidden_name(&dirent.file_name()) {
                continue;
            }
            let Ok(child_metadata) = dirent.metadata() else { continue };

            if child_metadata.is_dir() {
                dir_paths.push(dirent.path());
            } else {
                let size = child_metadata.len();
                file_total = file_total.saturating_add(size);
                if show_files {
                    files.push(Entry::file(dirent.path(), size));
                }
            }
        }

        // Sibling totals are independent cache lookups; resolve them in
        // parallel.
        let mut dirs: Vec<Entry> = dir_paths
            .par_iter()
            .map(|dir_path| Entry::directory(dir_path.clone(), self.cache.get(dir_path)))
            .collect();

        let dir_total: u64 = dirs.iter().map(|dir| dir.size).sum();
        let total = dir_total.saturating_add(file_total);

        dirs.sort_by(|a, b| b.size.cmp(&a.size));
        files.sort_by(|a, b| b.size.cmp(&a.size));

        let mut children = dirs;
        children.extend(files);

        if total > 0 {
            for child in &mut children {
                child.percent = child.size as f64 / total as f64 * 100.0;
            }
        }

        Ok(Entry {
            name: base_name(path),
            path: path.to_path_buf(),
            size: total,
            percent: 0.0,
            is_dir: true,
            depth: 0,
            children,
        })
    }
}
