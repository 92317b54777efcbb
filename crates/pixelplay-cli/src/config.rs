use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use directories::ProjectDirs;
use pixelplay_core::encode::{OutputFormat, DEFAULT_JPEG_QUALITY};
use pixelplay_core::store::DEFAULT_DATABASE_FILE;
use serde::Deserialize;
use tracing::debug;

const CONFIG_FILE_NAME: &str = "pixelplay.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Database file. Defaults to the platform data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadSection {
    pub format: String,
    pub jpeg_quality: u8,
}

impl Default for DownloadSection {
    fn default() -> Self {
        Self {
            format: "png".to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreSection,
    pub download: DownloadSection,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist and parse. Without one, the platform config
    /// directory is tried and a missing file falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let cfg = Self::parse(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Database location: `--db` flag, then `store.path`, then the data directory.
    pub fn database_path(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(path) = flag.or(self.store.path.as_deref()) {
            return path.to_path_buf();
        }
        match project_dirs() {
            Some(dirs) => dirs.data_dir().join(DEFAULT_DATABASE_FILE),
            None => PathBuf::from(DEFAULT_DATABASE_FILE),
        }
    }

    /// Download format: `--format` flag, then `download.format`.
    pub fn download_format(&self, flag: Option<&str>) -> anyhow::Result<OutputFormat> {
        let name = flag.unwrap_or(&self.download.format);
        let format = name.parse::<OutputFormat>()?;
        Ok(match format {
            OutputFormat::Jpeg { .. } => OutputFormat::Jpeg {
                quality: self.download.jpeg_quality.clamp(1, 100),
            },
            OutputFormat::Png => OutputFormat::Png,
        })
    }

    fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "Pixelplay", "pixelplay")
}
