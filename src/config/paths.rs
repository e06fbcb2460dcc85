//! Cross-platform application paths using the `dirs` crate.
//!
//! Config dir (client settings):
//!   Windows: %APPDATA%\chattr\
//!   macOS:   ~/Library/Application Support/chattr/
//!   Linux:   ~/.config/chattr/

use std::path::PathBuf;

/// Resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory holding `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "chattr";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");

        Self {
            config_dir,
            settings_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_file_lives_in_config_dir() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.ends_with("chattr"));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert_eq!(paths.settings_file.parent(), Some(paths.config_dir.as_path()));
    }
}
