//! Auto-location of the metadata module when no path is given.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// File names searched for, in order.
pub const DEFAULT_MODULE_NAMES: &[&str] = &[
    "platform-metadata.json",
    "platform-metadata.yaml",
    "platform-metadata.yml",
];

/// Look for a metadata module in `dir`, then in the user data directory.
pub fn auto_locate<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
    let mut search_dirs = vec![dir.as_ref().to_path_buf()];
    if let Some(dirs) = ProjectDirs::from("", "", "deprecheck") {
        search_dirs.push(dirs.data_dir().to_path_buf());
    }

    for search_dir in &search_dirs {
        for name in DEFAULT_MODULE_NAMES {
            let candidate = search_dir.join(name);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "auto-located metadata module");
                return Some(candidate);
            }
        }
    }
    None
}
