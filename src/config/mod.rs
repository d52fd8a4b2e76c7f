use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub extractor: ExtractorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Path or name of the yt-dlp executable
    pub binary: String,
    pub timeout_secs: u64,
    /// Passed to yt-dlp before the target URL
    pub extra_args: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            binary: "yt-dlp".to_string(),
            timeout_secs: 45,
            extra_args: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Command-line `--host`/`--port` win over everything else.
    pub fn override_with(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
    }
}

impl ExtractorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file {}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn get_logging_format(&self) -> &str {
        &self.logging.format
    }

    /// `PORT` from the environment overrides the configured port.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_port(std::env::var("PORT").ok())
    }

    fn apply_port(&mut self, port: Option<String>) -> Result<()> {
        if let Some(port) = port {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }
        Ok(())
    }
}

/// Looks for a config file in the usual places, first match wins.
pub fn find_config_path(explicit: Option<&str>) -> Option<String> {
    search_config_path(
        explicit,
        std::env::var("CONFIG_FILE").ok(),
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir().map(|home| home.display().to_string()),
    )
}

fn search_config_path(
    explicit: Option<&str>,
    config_file: Option<String>,
    xdg_config_home: Option<String>,
    home: Option<String>,
) -> Option<String> {
    if let Some(path) = explicit {
        return Some(path.to_string());
    }

    if let Some(path) = config_file {
        return Some(path);
    }

    if let Some(xdg_config_home) = xdg_config_home {
        let config_path = format!("{}/fluxo/config.toml", xdg_config_home);
        if Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    if let Some(home) = home {
        let config_path = format!("{}/.config/fluxo/config.toml", home);
        if Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.extractor.binary, "yt-dlp");
        assert_eq!(config.extractor.timeout(), Duration::from_secs(45));
        assert!(config.extractor.extra_args.is_empty());
        assert_eq!(config.get_logging_format(), "json");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
            [server]
            port = 9000

            [extractor]
            timeout_secs = 10
            extra_args = ["--cookies", "/tmp/cookies.txt"]
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.extractor.binary, "yt-dlp");
        assert_eq!(config.extractor.timeout_secs, 10);
        assert_eq!(config.extractor.extra_args.len(), 2);
        assert_eq!(config.get_logging_format(), "json");
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_file_is_error() {
        assert!(Config::parse("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nformat = \"text\"").unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.get_logging_format(), "text");
    }

    #[test]
    fn test_from_missing_file_is_error() {
        assert!(Config::from_file("/nonexistent/fluxo/config.toml").is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        assert_eq!(
            find_config_path(Some("/etc/fluxo.toml")).as_deref(),
            Some("/etc/fluxo.toml")
        );
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        config.apply_port(None).unwrap();
        assert_eq!(config.server.port, 8080);

        config.apply_port(Some("9100".to_string())).unwrap();
        assert_eq!(config.server.port, 9100);

        assert!(config.apply_port(Some("http".to_string())).is_err());
        assert!(config.apply_port(Some("70000".to_string())).is_err());
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_command_line_beats_port_env() {
        let mut config = Config::parse("[server]\nport = 9000").unwrap();
        config.apply_port(Some("9100".to_string())).unwrap();

        config.server.override_with(None, Some(7000));
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.host, "0.0.0.0");

        config.server.override_with(Some("127.0.0.1".to_string()), None);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7000);
    }

    fn write_config(dir: &std::path::Path) -> String {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "").unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_discovery_order() {
        let xdg = tempfile::TempDir::new().unwrap();
        let home = tempfile::TempDir::new().unwrap();
        let xdg_root = xdg.path().display().to_string();
        let home_root = home.path().display().to_string();

        // Nothing on disk yet
        assert_eq!(
            search_config_path(None, None, Some(xdg_root.clone()), Some(home_root.clone())),
            None
        );

        let home_file = write_config(&home.path().join(".config/fluxo"));
        assert_eq!(
            search_config_path(None, None, Some(xdg_root.clone()), Some(home_root.clone())),
            Some(home_file)
        );

        let xdg_file = write_config(&xdg.path().join("fluxo"));
        assert_eq!(
            search_config_path(None, None, Some(xdg_root.clone()), Some(home_root.clone())),
            Some(xdg_file.clone())
        );

        assert_eq!(
            search_config_path(
                None,
                Some("/srv/fluxo.toml".to_string()),
                Some(xdg_root.clone()),
                Some(home_root.clone())
            )
            .as_deref(),
            Some("/srv/fluxo.toml")
        );

        assert_eq!(
            search_config_path(
                Some("/etc/fluxo.toml"),
                Some("/srv/fluxo.toml".to_string()),
                Some(xdg_root),
                Some(home_root)
            )
            .as_deref(),
            Some("/etc/fluxo.toml")
        );

        let loaded = Config::from_file(&xdg_file).unwrap();
        assert_eq!(loaded.server.port, 8080);
    }
}
