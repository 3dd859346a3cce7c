//! # Configuration Loader
//!
//! Reads the TOML file and maps it into [`AppConfig`]. Range checks and
//! defaults live in `AppConfig::from_toml`; this module only finds and reads
//! the file.

use std::path::PathBuf;

use anyhow::Context;
use bc_core::config::AppConfig;
use tracing::debug;

/// Environment variable holding an explicit config file path.
pub const CONFIG_ENV: &str = "BICHO_CAPIBA_CONFIG";

const APP_DIR: &str = "bicho-capiba";
const CONFIG_FILE: &str = "config.toml";

/// Where the config file is expected, and whether the user asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given through [`CONFIG_ENV`]; it must exist.
    Explicit(PathBuf),
    /// Platform config dir; a missing file means defaults.
    Platform(PathBuf),
    /// No env override and no platform config dir.
    Unavailable,
}

pub fn resolve_config_source() -> ConfigSource {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return ConfigSource::Explicit(PathBuf::from(path));
    }
    match dirs::config_dir() {
        Some(dir) => ConfigSource::Platform(dir.join(APP_DIR).join(CONFIG_FILE)),
        None => ConfigSource::Unavailable,
    }
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read, is not valid TOML, or carries
/// out-of-range values.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

pub fn load_from_source(source: ConfigSource) -> anyhow::Result<AppConfig> {
    match source {
        ConfigSource::Explicit(path) => load_config(path),
        ConfigSource::Platform(path) if path.exists() => load_config(path),
        ConfigSource::Platform(path) => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(AppConfig::default())
        }
        ConfigSource::Unavailable => Ok(AppConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            [api]
            base_url = "https://api.bichocapiba.org/v1/"
            timeout_secs = 15

            [feed]
            page_size = 24

            [lookup]
            debounce_ms = 250

            [logging]
            directory = "/var/log/bicho-capiba"
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.api.base_url, "https://api.bichocapiba.org/v1");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.feed.page_size, 24);
        assert_eq!(config.lookup.debounce_ms, 250);
        assert_eq!(
            config.logging.directory,
            Some(PathBuf::from("/var/log/bicho-capiba"))
        );
    }

    #[test]
    fn test_load_config_fills_missing_values_with_defaults() {
        let temp_file = write_config("[api]\n");

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_reports_invalid_toml() {
        let temp_file = write_config("[api\nbase_url = ");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(format!("{err:#}").contains("TOML"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ConfigSource::Explicit(dir.path().join("nope.toml"));
        assert!(load_from_source(source).is_err());
    }

    #[test]
    fn test_missing_platform_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let source = ConfigSource::Platform(dir.path().join(CONFIG_FILE));
        assert_eq!(load_from_source(source).unwrap(), AppConfig::default());
    }

    #[test]
    #[serial]
    fn test_env_override_wins() {
        std::env::set_var(CONFIG_ENV, "/etc/bicho-capiba.toml");
        let source = resolve_config_source();
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(
            source,
            ConfigSource::Explicit(PathBuf::from("/etc/bicho-capiba.toml"))
        );
    }

    #[test]
    #[serial]
    fn test_empty_env_is_ignored() {
        std::env::set_var(CONFIG_ENV, "");
        let source = resolve_config_source();
        std::env::remove_var(CONFIG_ENV);

        assert!(!matches!(source, ConfigSource::Explicit(_)));
    }
}
