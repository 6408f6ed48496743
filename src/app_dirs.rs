use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the leaderboard and log live: `$HOME/.local/state/hangr`
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".local").join("state").join("hangr"))
        } else {
            ProjectDirs::from("", "", "hangr").map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn leaderboard_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join("leaderboard.txt"))
            .unwrap_or_else(|| PathBuf::from("leaderboard.txt"))
    }

    pub fn log_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join("hangr.log"))
            .unwrap_or_else(|| PathBuf::from("hangr.log"))
    }

    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "hangr")
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("hangr_config.json"))
    }
}
