use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base path override, mainly for containers and tests.
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("FLICKLOG_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("flicklog");

        Ok(Self::from_base(base_dir))
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Directory holding the persisted collections (watchlist.json etc.).
    pub fn library_dir(&self) -> PathBuf {
        self.data_dir.join("library")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("flicklog.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.library_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".flicklog")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_dir_nests_under_data_dir() {
        let paths = PathManager::from_base(PathBuf::from("/tmp/flicklog-test"));
        assert_eq!(
            paths.library_dir(),
            PathBuf::from("/tmp/flicklog-test/data/library")
        );
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/flicklog-test/config.toml")
        );
    }
}
