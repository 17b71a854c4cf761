//! Dashboard settings stored as TOML in the application folder.

mod io;
mod types;

pub use io::{
    CONFIG_FILE_NAME, DATA_PATH_ENV, DEFAULT_DATA_PATH, config_path, data_path_from_env,
    load_from, load_or_default, resolve_data_path, resolve_image_root, save_to_path,
    write_default_if_missing,
};
pub use types::{AppConfig, ConfigError, MAX_TOOLTIP_WIDTH, MIN_TOOLTIP_WIDTH};
