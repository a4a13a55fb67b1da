//! Config file resolution: CLI flag → environment → XDG → working directory.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment variable naming the taxonomy document.
pub const CONFIG_ENV: &str = "GUILD_ROSTER_CONFIG";

/// Directory under the XDG config home.
pub const APP_DIR: &str = "guild-roster";

/// File name used for both the XDG lookup and the working-directory default.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Where the resolved config path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Cli,
    Env,
    Xdg,
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Cli => write!(f, "cli"),
            ConfigSource::Env => write!(f, "env"),
            ConfigSource::Xdg => write!(f, "xdg"),
            ConfigSource::Default => write!(f, "default"),
        }
    }
}

/// Resolved location of the taxonomy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub config: PathBuf,
    pub source: ConfigSource,
}

/// Resolve the config path from the process environment.
pub fn resolve_config(cli: Option<&Path>) -> ConfigPaths {
    resolve_config_with(cli, std::env::var_os(CONFIG_ENV), dirs::config_dir())
}

/// Resolution with every input supplied explicitly.
///
/// The XDG candidate is only chosen when the file exists there; otherwise the
/// relative default `config.json` is returned even if it does not exist, so
/// the caller reports a read error against a path the user recognises.
pub fn resolve_config_with(
    cli: Option<&Path>,
    env: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> ConfigPaths {
    let resolved = if let Some(path) = cli {
        ConfigPaths {
            config: path.to_path_buf(),
            source: ConfigSource::Cli,
        }
    } else if let Some(path) = env.filter(|v| !v.is_empty()) {
        ConfigPaths {
            config: PathBuf::from(path),
            source: ConfigSource::Env,
        }
    } else {
        let xdg = config_dir
            .map(|dir| dir.join(APP_DIR).join(DEFAULT_CONFIG_FILE))
            .filter(|candidate| candidate.is_file());
        match xdg {
            Some(config) => ConfigPaths {
                config,
                source: ConfigSource::Xdg,
            },
            None => ConfigPaths {
                config: PathBuf::from(DEFAULT_CONFIG_FILE),
                source: ConfigSource::Default,
            },
        }
    };
    debug!(path = %resolved.config.display(), source = %resolved.source, "config path resolved");
    resolved
}
