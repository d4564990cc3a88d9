//! Where the host keeps its config file and logs.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const CONFIG_FILE: &str = "config.json";
const LATEST_LOG: &str = "latest.log";

/// Archived logs kept next to `latest.log`.
const KEPT_LOGS: usize = 25;

fn dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "groupselect", "groupselect")
}

/// `config.json` in the platform config directory.
pub fn config_file() -> Option<PathBuf> {
    dirs().map(|d| d.config_dir().join(CONFIG_FILE))
}

/// The log file of the current run, in the platform cache directory.
pub fn log_file() -> Option<PathBuf> {
    dirs().map(|d| d.cache_dir().join(LATEST_LOG))
}

/// Archive the previous run's log under its start-up timestamp and prune
/// the archive. Runs before the logger opens `latest.log`.
pub fn rotate_logs() {
    if let Some(d) = dirs() {
        rotate_logs_in(d.cache_dir(), KEPT_LOGS);
    }
}

fn rotate_logs_in(dir: &Path, keep: usize) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        if let Err(err) = fs::rename(&latest, dir.join(format!("{}.log", stamp))) {
            eprintln!("Warning: could not archive {}: {}", latest.display(), err);
        }
    }
    cleanup_old_logs(dir, keep);
}

/// Delete all but the `keep` newest archived logs.
fn cleanup_old_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archived: Vec<(Option<std::time::SystemTime>, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .map(|path| (fs::metadata(&path).and_then(|m| m.modified()).ok(), path))
        .collect();

    // Newest first; everything past `keep` goes
    archived.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, path) in archived.into_iter().skip(keep) {
        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("groupselect-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_rotate_archives_latest() {
        let dir = scratch_dir("rotate");
        fs::write(dir.join("latest.log"), "old run").unwrap();

        rotate_logs_in(&dir, 5);

        assert!(!dir.join("latest.log").exists());
        let archived = fs::read_dir(&dir).unwrap().count();
        assert_eq!(archived, 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_cleanup_keeps_limit() {
        let dir = scratch_dir("cleanup");
        for n in 0..4 {
            fs::write(dir.join(format!("2024010{}_000000.log", n)), "").unwrap();
        }
        fs::write(dir.join("notes.txt"), "").unwrap();

        cleanup_old_logs(&dir, 2);

        let logs = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".log"))
            .count();
        assert_eq!(logs, 2);
        assert!(dir.join("notes.txt").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
