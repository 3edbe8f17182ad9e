//! Location of the nsdiff config file
//!
//! nsdiff keeps a single `config.yaml`. Lookup order for its directory:
//! 1. `NSDIFF_CONFIG_DIR`
//! 2. `$XDG_CONFIG_HOME/nsdiff` (not on Windows)
//! 3. The platform config dir from `directories` (`~/.config/nsdiff`,
//!    `%APPDATA%\nsdiff\config`)

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "nsdiff";
const CONFIG_FILE: &str = "config.yaml";

/// Directory holding `config.yaml`
pub fn config_dir() -> PathBuf {
    let xdg = if cfg!(windows) {
        None
    } else {
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from)
    };
    resolve_config_dir(std::env::var_os("NSDIFF_CONFIG_DIR").map(PathBuf::from), xdg)
}

fn resolve_config_dir(override_dir: Option<PathBuf>, xdg_home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    if let Some(home) = xdg_home.filter(|d| !d.as_os_str().is_empty()) {
        return home.join(APP_NAME);
    }
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".config").join(APP_NAME))
}

/// Config file used when `--config` is not given
pub fn root_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_dir_wins() {
        let dir = resolve_config_dir(Some("/etc/nsdiff".into()), Some("/home/u/.config".into()));
        assert_eq!(dir, PathBuf::from("/etc/nsdiff"));
    }

    #[test]
    fn test_xdg_home_gets_app_dir() {
        let dir = resolve_config_dir(None, Some("/home/u/.config".into()));
        assert_eq!(dir, PathBuf::from("/home/u/.config/nsdiff"));

        let dir = resolve_config_dir(Some(PathBuf::new()), Some("/xdg".into()));
        assert_eq!(dir, PathBuf::from("/xdg/nsdiff"));
    }

    #[test]
    fn test_root_config_path() {
        assert!(root_config_path().ends_with(CONFIG_FILE));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
