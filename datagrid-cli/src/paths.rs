//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "datagrid";
const APPLICATION: &str = "datagrid";

/// Log file name inside the cache directory.
const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs are written.
///
/// - Linux: `$XDG_CACHE_HOME/datagrid` or `~/.cache/datagrid`
/// - macOS: `~/Library/Caches/dev.datagrid.datagrid`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the default config file path.
///
/// - Linux: `$XDG_CONFIG_HOME/datagrid/config.toml`
/// - macOS: `~/Library/Application Support/dev.datagrid.datagrid/config.toml`
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Prepare the log file location and return it.
///
/// The previous `latest.log` is archived under a timestamped name and old
/// archives beyond the limit are removed. Falls back to the working
/// directory when no cache directory is available.
pub fn prepare_log_file() -> PathBuf {
    let Some(cache) = cache_dir().filter(|dir| fs::create_dir_all(dir).is_ok()) else {
        return PathBuf::from("datagrid.log");
    };

    let latest = cache.join(LATEST_LOG);
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, cache.join(format!("{timestamp}.log")));
    }
    prune_logs(&cache, MAX_OLD_LOGS);
    latest
}

fn prune_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archived: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();
    if archived.len() <= keep {
        return;
    }

    // Oldest first
    archived.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());
    for entry in &archived[..archived.len() - keep] {
        let _ = fs::remove_file(entry.path());
    }
}
