use crate::paths::config_search_paths;
use std::path::{Path, PathBuf};

/// Load config file content from the first location that has one
///
/// Searches for the config in:
/// 1. Current working directory as `.gh-pr-discovery.toml`
/// 2. Platform config directory as `gh-pr-discovery/config.toml`
/// 3. Home directory as `.gh-pr-discovery.toml`
///
/// Returns the path and file content if found, None otherwise.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    config_search_paths()
        .into_iter()
        .find_map(|path| read_config(&path).map(|content| (path, content)))
}

fn read_config(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some(content)
        }
        Err(_) => None,
    }
}
