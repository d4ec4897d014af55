use std::path::PathBuf;

use crate::scanner::Entry;

/// Rows reserved for the path header and the status line.
pub const HEADER_ROWS: usize = 2;

/// What a drill gesture resolved to. `Load` goes to the load controller,
/// `Launch` to the file launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillRequest {
    Load(PathBuf),
    Launch(PathBuf),
}

/// Cursor, scroll window and visible list over the active root.
///
/// Every mutation re-establishes the same invariant: the cursor stays inside
/// `[scroll, scroll + max_visible)` and the scroll offset never runs past the
/// end of the list.
pub struct NavigationState {
    root: Entry,
    visible: Vec<Entry>,
    cursor: usize,
    scroll: usize,
    viewport_height: usize,
    show_files: bool,
}

impl NavigationState {
    pub fn new(root: Entry, viewport_height: usize, show_files: bool) -> Self {
        let mut nav = Self {
            root,
            visible: Vec::new(),
            cursor: 0,
            scroll: 0,
            viewport_height,
            show_files,
        };
        nav.rebuild_visible();
        nav
    }

    pub fn root(&self) -> &Entry {
        &self.root
    }

    pub fn visible(&self) -> &[Entry] {
        &self.visible
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// List rows the viewport can render at once.
    pub fn max_visible(&self) -> usize {
        self.viewport_height.saturating_sub(HEADER_ROWS)
    }

    /// The slice of the visible list currently on screen.
    pub fn window(&self) -> &[Entry] {
        let start = self.scroll.min(self.visible.len());
        let end = (start + self.max_visible()).min(self.visible.len());
        &self.visible[start..end]
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = (self.visible.len() - 1) as isize;
        self.cursor = (self.cursor as isize).saturating_add(delta).clamp(0, last) as usize;
        self.ensure_cursor_visible();
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
        self.ensure_cursor_visible();
    }

    pub fn move_to_end(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.cursor = self.visible.len() - 1;
        self.ensure_cursor_visible();
    }

    /// Move by one screenful; `direction` is -1 for up, +1 for down.
    pub fn page_move(&mut self, direction: isize) {
        self.move_cursor(direction.saturating_mul(self.max_visible() as isize));
    }

    /// Resolve the entry under the cursor into a drill request.
    pub fn select(&self) -> Option<DrillRequest> {
        self.drill_into(self.cursor)
    }

    pub fn drill_into(&self, index: usize) -> Option<DrillRequest> {
        let entry = self.visible.get(index)?;
        if entry.is_dir {
            Some(DrillRequest::Load(entry.path.clone()))
        } else {
            Some(DrillRequest::Launch(entry.path.clone()))
        }
    }

    /// Request the parent of the active root; `None` at the filesystem root.
    pub fn drill_up(&self) -> Option<DrillRequest> {
        self.root
            .path
            .parent()
            .map(|parent| DrillRequest::Load(parent.to_path_buf()))
    }

    /// Install a freshly scanned root and rebuild the visible list. Cursor
    /// and scroll reset to the top.
    pub fn apply_load_result(&mut self, new_root: Entry) {
        self.root = new_root;
        self.rebuild_visible();
    }

    /// The viewport changed size; the cursor keeps its position and the
    /// scroll window shifts around it.
    pub fn resize(&mut self, viewport_height: usize) {
        self.viewport_height = viewport_height;
        self.ensure_cursor_visible();
    }

    fn rebuild_visible(&mut self) {
        let mut visible = Vec::with_capacity(self.root.children.len() + 1);
        if let Some(parent) = self.root.path.parent() {
            visible.push(Entry::parent_link(parent.to_path_buf()));
        }
        visible.extend(
            self.root
                .children
                .iter()
                .filter(|child| child.is_dir || self.show_files)
                .cloned(),
        );
        self.visible = visible;
        self.cursor = 0;
        self.scroll = 0;
        self.ensure_cursor_visible();
    }

    fn ensure_cursor_visible(&mut self) {
        if self.visible.is_empty() {
            return;
        }

        let max_visible = self.max_visible();
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + max_visible {
            self.scroll = (self.cursor + 1).saturating_sub(max_visible);
        }

        let max_scroll = self.visible.len().saturating_sub(max_visible);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
    }
}
