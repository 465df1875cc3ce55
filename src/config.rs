//! Intake configuration.
//!
//! Loaded from `config.toml` beside the executable, or from the file named
//! by `RECIPE_INTAKE_CONFIG`. Relative paths inside the file resolve against
//! the file's own directory.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "RECIPE_INTAKE_CONFIG";

/// Name of the recipes directory under the install location.
pub const RECIPES_DIR_NAME: &str = "Recipes";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine install directory from executable location")]
    NoInstallDir,

    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Raw file contents, before path resolution.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    catalog: PathBuf,
    recipes_dir: Option<PathBuf>,
    output: Option<PathBuf>,
}

/// Resolved configuration: every path is usable as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The host's production catalog document.
    pub catalog: PathBuf,

    /// Directory scanned for recipe files.
    pub recipes_dir: PathBuf,

    /// Where the merged catalog is written.
    pub output: PathBuf,
}

impl Config {
    /// Load config from `RECIPE_INTAKE_CONFIG` or `<install dir>/config.toml`.
    pub fn load() -> Result<Self, ConfigError> {
        let install_dir = install_dir()?;
        let path = match env::var_os(CONFIG_ENV) {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => install_dir.join(CONFIG_FILE_NAME),
        };
        Self::load_from(&path, &install_dir)
    }

    /// Load config from `path`.
    ///
    /// Without a `recipes-dir` entry, recipes are read from
    /// `<install_dir>/Recipes`.
    pub fn load_from(path: &Path, install_dir: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or(Path::new(""));
        let catalog = base.join(file.catalog);
        let recipes_dir = file
            .recipes_dir
            .map_or_else(|| install_dir.join(RECIPES_DIR_NAME), |d| base.join(d));
        let output = file.output.map_or_else(|| catalog.clone(), |o| base.join(o));

        Ok(Self {
            catalog,
            recipes_dir,
            output,
        })
    }
}

/// The directory holding the running executable.
pub fn install_dir() -> Result<PathBuf, ConfigError> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or(ConfigError::NoInstallDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn resolves_relative_paths_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "catalog = \"db/production.json\"\n\
             recipes-dir = \"my-recipes\"\n\
             output = \"/tmp/merged.json\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path, Path::new("/opt/intake")).unwrap();

        assert_eq!(config.catalog, dir.path().join("db/production.json"));
        assert_eq!(config.recipes_dir, dir.path().join("my-recipes"));
        assert_eq!(config.output, PathBuf::from("/tmp/merged.json"));
    }

    #[test]
    fn defaults_recipes_dir_and_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "catalog = \"production.json\"\n").unwrap();

        let config = Config::load_from(&path, Path::new("/opt/intake")).unwrap();

        assert_eq!(config.recipes_dir, PathBuf::from("/opt/intake/Recipes"));
        assert_eq!(config.output, config.catalog);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let err = Config::load_from(&path, dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn rejects_unknown_and_missing_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "recipes-dir = \"r\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path, dir.path()),
            Err(ConfigError::Toml { .. })
        ));

        fs::write(&path, "catalog = \"c\"\nrecipe-dir = \"typo\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path, dir.path()),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn install_dir_is_executable_parent() {
        let dir = install_dir().unwrap();
        let exe = env::current_exe().unwrap();
        assert_eq!(exe.parent().unwrap(), dir);
    }
}
