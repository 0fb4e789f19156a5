use crate::search::SearchSource;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub search_source: SearchSource,

    /// Width of the original pane, in percent of the screen.
    pub split_percent: u16,

    pub line_numbers: bool,

    pub show_hidden: bool,

    pub start_dir: Option<String>,

    #[serde(skip)]
    pub app_root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_source: SearchSource::Memory,
            split_percent: 44,
            line_numbers: false,
            show_hidden: false,
            start_dir: None,
            app_root: crate::path_utils::get_app_root(),
        }
    }
}

impl AppConfig {
    /// Loads `.env`, then layers defaults, the config file and `LINESIFT_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        // 1. Try standard dotenv discovery from current dir
        if dotenvy::dotenv().is_err() {
            // 2. Fallback: the app root
            let path = crate::path_utils::get_app_root().join(".env");
            if path.exists() {
                let _ = dotenvy::from_path(&path);
            }
        }

        Self::from_sources(file)
    }

    /// Same layering as `load`, without touching `.env` files.
    pub fn from_sources(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::layered(file, Environment::with_prefix("LINESIFT").try_parsing(true))
    }

    fn layered(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("search_source", "memory")?
            .set_default("split_percent", 44)?
            .set_default("line_numbers", false)?
            .set_default("show_hidden", false)?;

        builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("linesift").required(false)),
        };

        let mut config: Self = builder
            .add_source(env)
            .build()?
            .try_deserialize()?;
        config.split_percent = config.split_percent.clamp(10, 90);
        config.app_root = crate::path_utils::get_app_root();

        Ok(config)
    }

    /// Directory the file picker opens in, when configured.
    pub fn start_dir(&self) -> Option<PathBuf> {
        self.start_dir
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(crate::path_utils::get_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // Variables come from the given map only, never from the process.
    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("LINESIFT")
            .try_parsing(true)
            .source(Some(map))
    }

    fn fixture(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linesift.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_without_sources() {
        let (_dir, path) = fixture("");
        let config = AppConfig::layered(Some(&path), env(&[])).unwrap();
        assert_eq!(config.search_source, SearchSource::Memory);
        assert_eq!(config.split_percent, 44);
        assert!(!config.line_numbers);
        assert!(!config.show_hidden);
        assert_eq!(config.start_dir(), None);
    }

    #[test]
    fn file_overrides_defaults() {
        let (_dir, path) = fixture(
            "search_source = \"disk\"\nsplit_percent = 99\nline_numbers = true\nstart_dir = \"/var/log\"\n",
        );

        let config = AppConfig::layered(Some(&path), env(&[])).unwrap();
        assert_eq!(config.search_source, SearchSource::Disk);
        assert_eq!(config.split_percent, 90);
        assert!(config.line_numbers);
        assert_eq!(config.start_dir(), Some(PathBuf::from("/var/log")));
    }

    #[test]
    fn env_overrides_file() {
        let (_dir, path) = fixture("search_source = \"disk\"\nsplit_percent = 60\n");
        let vars = [
            ("LINESIFT_SEARCH_SOURCE", "memory"),
            ("LINESIFT_SPLIT_PERCENT", "5"),
            ("LINESIFT_SHOW_HIDDEN", "true"),
        ];

        let config = AppConfig::layered(Some(&path), env(&vars)).unwrap();
        assert_eq!(config.search_source, SearchSource::Memory);
        assert_eq!(config.split_percent, 10);
        assert!(config.show_hidden);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::layered(Some(Path::new("/nonexistent/linesift.toml")), env(&[]));
        assert!(result.is_err());
    }
}
