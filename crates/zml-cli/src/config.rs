//! Configuration file loading for the CLI
//!
//! Finds and loads a TOML configuration file from an explicit path, the local
//! `zml/` directory or the platform config directory, then applies the
//! command-line overrides on top.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use zml::{ZmlError, config::AppConfig};

use crate::Args;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ZmlError {
    fn from(err: ConfigError) -> Self {
        ZmlError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (zml/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ZmlError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("zml/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "zml", "zml") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Apply command-line overrides to a loaded configuration.
pub fn apply_args(config: &mut AppConfig, args: &Args) {
    let canvas = config.canvas_mut();
    if let Some(width) = args.width {
        canvas.set_width(width);
    }
    if let Some(height) = args.height {
        canvas.set_height(height);
    }

    let style = config.style_mut();
    if let Some(color) = &args.background_color {
        style.set_background_color(color.as_str());
    }
    if let Some(dir) = &args.font_dir {
        style.set_font_dir(dir.as_str());
    }
    if let Some(font) = &args.title_font {
        style.set_title_font(font.as_str());
    }
    if let Some(font) = &args.element_font {
        style.set_element_font(font.as_str());
    }
    if let Some(font) = &args.label_font {
        style.set_label_font(font.as_str());
    }

    debug!(
        width = config.canvas().width(),
        height = config.canvas().height();
        "Applied command-line overrides"
    );
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ZmlError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn test_explicit_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[canvas]\nwidth = 640\n\n[style]\nbackground_color = \"black\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.canvas().width(), 640);
        assert_eq!(config.canvas().height(), 1024);
        assert_eq!(config.style().background_color().rgb8(), (0, 0, 0));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ZmlError::Config(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[canvas\nwidth = ").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_args_override_config() {
        let mut config = AppConfig::default();
        config.style_mut().set_background_color("black");

        let args = Args {
            input: "flow.zml".to_string(),
            width: Some(300),
            background_color: Some("steelblue".to_string()),
            label_font: Some("Italic.ttf,9".to_string()),
            ..Default::default()
        };
        apply_args(&mut config, &args);

        assert_eq!(config.canvas().width(), 300);
        assert_eq!(config.canvas().height(), 1024);
        assert_eq!(config.style().background_color().rgb8(), (70, 130, 180));
        let label = config.style().label_font().unwrap().unwrap();
        assert_eq!(label.file(), "Italic.ttf");
        assert!(config.style().title_font().unwrap().is_none());
    }
}
