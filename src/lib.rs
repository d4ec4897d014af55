/*!
 * spacescope - Interactive disk-usage browser for the terminal
 *
 * Scans one directory level at a time, answers subtree totals through a
 * process-lifetime cache, and navigates with a cursor over a bounded
 * scroll window.
 */

pub mod cache;
pub mod config;
pub mod error;
pub mod input;
pub mod launcher;
pub mod loader;
pub mod nav;
pub mod scanner;
pub mod ui;

pub use cache::SizeCache;
pub use config::Config;
pub use error::{LaunchError, ScanError};
pub use loader::{LoadController, LoadState};
pub use nav::{DrillRequest, NavigationState};
pub use scanner::{Entry, Scanner};
