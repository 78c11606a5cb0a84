//! Fixed names and pacman defaults

/// Directory under the user config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "pkgverify";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const PACMAN_BINARY: &str = "/usr/bin/pacman";
pub const PACMAN_DB_PATH: &str = "/var/lib/pacman";

/// Root used when verifying an installed package and no root is configured
pub const SYSTEM_ROOT: &str = "/";

pub const DEFAULT_MAX_CONCURRENCY: usize = 4;
