use mindmap_engine::LayoutStrategy;
use mindmap_engine::diagram::DiagramSettings;
use mindmap_engine::notes::{NOTE_PANEL_DEFAULT_WIDTH, clamp_note_panel_width};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Zoom with the mouse wheel, anchored at the cursor.
    pub wheel_zoom: bool,
    pub default_layout: LayoutStrategy,
    /// Width of the note panel in pixels, kept within 200..=800.
    pub note_panel_width: u32,
    /// Where exported SVG files are written. Defaults to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wheel_zoom: true,
            default_layout: LayoutStrategy::default(),
            note_panel_width: NOTE_PANEL_DEFAULT_WIDTH,
            export_dir: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let width = clamp_note_panel_width(config.note_panel_width);
        if width != config.note_panel_width {
            log::warn!(
                "note_panel_width {} out of range, using {width}",
                config.note_panel_width
            );
            config.note_panel_width = width;
        }

        // Expand shell variables and tilde in the export directory
        config.export_dir = config
            .export_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        log::info!("loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mindmap");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Settings handed to every diagram instance at construction.
    pub fn to_settings(&self) -> DiagramSettings {
        DiagramSettings {
            wheel_zoom: self.wheel_zoom,
            default_layout: self.default_layout,
            note_panel_width: clamp_note_panel_width(self.note_panel_width),
        }
    }

    /// Path an export named `file_name` is written to.
    pub fn export_path(&self, file_name: &str) -> PathBuf {
        match &self.export_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
