use crate::config::pure::parse_config;
use crate::config::types::{CONFIG_FILE_NAME, ConfigError, ConfigResult, SplituxConfig};

use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Location of splitux.cfg inside the host's plugin config directory
/// (BepInEx/config on a BepInEx install)
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the instance config.
///
/// A missing file is not an error: it means the game was started outside
/// splitux and the plugin should stay in passthrough mode.
pub fn load_config(path: &Path) -> ConfigResult<Option<SplituxConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("[config] Config not found at {}", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = parse_config(&content);
    for patch in &config.runtime_patches {
        debug!("[config] Loaded RuntimePatch: {}", patch);
    }
    Ok(Some(config))
}
