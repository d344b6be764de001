//! Configuration file paths
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Platform-specific locations of the global config file:
//! - Linux: `~/.config/gh-pr-discovery/config.toml`
//! - macOS: `~/Library/Application Support/gh-pr-discovery/config.toml`
//! - Windows: `%APPDATA%\gh-pr-discovery\config.toml`

use std::path::PathBuf;

const APP_NAME: &str = "gh-pr-discovery";
pub(crate) const LOCAL_CONFIG_FILE: &str = ".gh-pr-discovery.toml";

/// Path of the config file in the current working directory
pub fn local_config_path() -> PathBuf {
    PathBuf::from(LOCAL_CONFIG_FILE)
}

/// Path of the config file in the platform config directory
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join("config.toml"))
}

/// Path of the dotfile in the home directory
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOCAL_CONFIG_FILE))
}

/// Candidate config files in lookup order
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![local_config_path()];
    paths.extend(global_config_path());
    paths.extend(home_config_path());
    paths
}
