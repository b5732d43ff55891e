use std::{fs, path::Path, path::PathBuf};

use log::warn;

use crate::error::{ConfigError, Result};

const CONFIG_DIR: &str = ".config/twitter_cli";
const CONFIG_FILENAME: &str = "config.toml";

pub fn get_config_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
    Ok(home_dir.join(CONFIG_DIR))
}

pub fn get_config_file() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILENAME))
}

/// Warns when a file holding secrets is readable by anyone but its owner.
/// Returns `false` when the permissions are looser than expected.
pub fn check_permissions(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return true;
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = metadata.permissions().mode() & 0o777;

        if mode & 0o077 != 0 {
            warn!(
                "Permissions for {} are {mode:o}, expected 600. Run chmod 600 {}",
                path.display(),
                path.display()
            );
            return false;
        }
    }

    #[cfg(not(unix))]
    let _ = metadata;

    true
}
