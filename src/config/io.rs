use std::path::{Path, PathBuf};

use crate::app_dirs;

use super::types::{AppConfig, ConfigError};

/// File name of the settings file inside the application folder.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable naming the record table; beats `data_path`.
pub const DATA_PATH_ENV: &str = "FRAGVIEW_DATA";
/// Record table used when nothing else is configured, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/interactive_results.csv";

/// Path of `config.toml`, creating the application folder if needed.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load `config.toml`, falling back to defaults when it does not exist.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load settings from `path`; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = toml::from_str::<AppConfig>(&text)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?
        .normalized();
    if let Some(reason) = config.problem() {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        });
    }
    Ok(config)
}

/// Write `config` to `path`, creating parent folders as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Seed `path` with the default settings so users have a file to edit.
///
/// Returns `true` when a file was written.
pub fn write_default_if_missing(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    save_to_path(&AppConfig::default(), path)?;
    Ok(true)
}

/// Pick the record table path: environment override, then config, then default.
pub fn resolve_data_path(config: &AppConfig, env_override: Option<PathBuf>) -> PathBuf {
    env_override
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| config.data_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

/// Value of [`DATA_PATH_ENV`], if set.
pub fn data_path_from_env() -> Option<PathBuf> {
    std::env::var_os(DATA_PATH_ENV).map(PathBuf::from)
}

/// Folder relative image references resolve against.
pub fn resolve_image_root(config: &AppConfig, data_path: &Path) -> PathBuf {
    config.image_root.clone().unwrap_or_else(|| {
        data_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::MAX_TOOLTIP_WIDTH;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
data_path = "/srv/fragments/results.json"
tooltip_width = 9000

[columns]
image = "img"

[roster]
models = ["SchNet", "PaiNN"]
"#,
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(
            config.data_path.as_deref(),
            Some(Path::new("/srv/fragments/results.json"))
        );
        assert_eq!(config.tooltip_width, MAX_TOOLTIP_WIDTH);
        assert_eq!(config.columns.image, "img");
        assert_eq!(config.columns.pca_x, "pca1");
        assert_eq!(config.roster.models.len(), 2);
        assert_eq!(config.roster.targets.len(), 3);
    }

    #[test]
    fn invalid_template_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[columns]\nerror_template = \"err_{model}\"\n").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "tooltip_width = [").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn default_file_is_written_once_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        assert!(write_default_if_missing(&path).unwrap());
        assert!(!write_default_if_missing(&path).unwrap());
        assert_eq!(load_from(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn data_path_prefers_env_then_config_then_default() {
        let mut config = AppConfig::default();
        assert_eq!(
            resolve_data_path(&config, None),
            PathBuf::from(DEFAULT_DATA_PATH)
        );
        config.data_path = Some(PathBuf::from("from_config.csv"));
        assert_eq!(
            resolve_data_path(&config, Some(PathBuf::new())),
            PathBuf::from("from_config.csv")
        );
        assert_eq!(
            resolve_data_path(&config, Some(PathBuf::from("from_env.json"))),
            PathBuf::from("from_env.json")
        );
    }

    #[test]
    fn image_root_defaults_to_data_folder() {
        let mut config = AppConfig::default();
        assert_eq!(
            resolve_image_root(&config, Path::new("/data/run1/table.csv")),
            PathBuf::from("/data/run1")
        );
        config.image_root = Some(PathBuf::from("/images"));
        assert_eq!(
            resolve_image_root(&config, Path::new("/data/run1/table.csv")),
            PathBuf::from("/images")
        );
    }
}
