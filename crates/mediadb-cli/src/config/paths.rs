//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Directory name under the XDG config home.
const APP_DIR: &str = "mediadb";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// Lookup order:
/// 1. `{dir}/config.toml` when `--dir` is given
/// 2. `$XDG_CONFIG_HOME/mediadb/config.toml`
/// 3. `$HOME/.config/mediadb/config.toml`
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when
/// `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    default_config_path(xdg.as_deref(), home.as_deref())
}

/// Picks the default config path from the XDG and home directories.
///
/// An empty or relative `XDG_CONFIG_HOME` is ignored.
fn default_config_path(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    let base = match (xdg_config_home.filter(|p| p.is_absolute()), home) {
        (Some(xdg), _) => xdg.to_path_buf(),
        (None, Some(home)) if !home.as_os_str().is_empty() => home.join(".config"),
        _ => bail!("cannot locate config directory: neither XDG_CONFIG_HOME nor HOME is set"),
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/mediadb-test");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/mediadb-test/config.toml"));
    }

    #[test]
    fn test_default_prefers_xdg_config_home() {
        // Arrange
        let xdg = Path::new("/xdg");
        let home = Path::new("/home/user");

        // Act
        let path = default_config_path(Some(xdg), Some(home)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/mediadb/config.toml"));
    }

    #[test]
    fn test_default_falls_back_to_home() {
        // Arrange
        let home = Path::new("/home/user");

        // Act
        let without_xdg = default_config_path(None, Some(home)).unwrap();
        let relative_xdg = default_config_path(Some(Path::new("cfg")), Some(home)).unwrap();

        // Assert
        assert_eq!(without_xdg, PathBuf::from("/home/user/.config/mediadb/config.toml"));
        assert_eq!(relative_xdg, without_xdg);
    }

    #[test]
    fn test_default_without_any_base_fails() {
        // Arrange & Act
        let result = default_config_path(None, None);

        // Assert
        assert!(result.is_err());
    }
}
