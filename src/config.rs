use serde::Deserialize;
use std::path::PathBuf;
use directories::ProjectDirs;
use anyhow::{Context, Result};
use std::fs;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    /// Interpreter for `.py` targets when no virtual environment is found.
    #[serde(default = "default_python")]
    pub python: String,
    #[serde(default)]
    pub tiles_file: Option<PathBuf>,
}

fn default_python() -> String {
    if cfg!(windows) { "python".to_string() } else { "python3".to_string() }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            tiles_file: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "appboard", "appboard")
}

impl Config {
    /// Where tiles are stored: an explicit override, then the config file,
    /// then the data directory.
    pub fn tiles_path(&self, overridden: Option<PathBuf>) -> PathBuf {
        overridden
            .or_else(|| self.general.tiles_file.clone())
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("shortcuts.json")))
            .unwrap_or_else(|| PathBuf::from("shortcuts.json"))
    }
}

pub fn load_config() -> Result<Config> {
    let config_path = if let Some(dirs) = project_dirs() {
        dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    };

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("reading {:?}", config_path))?;
    parse_config(&content).with_context(|| format!("parsing {:?}", config_path))
}

fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}
