use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Base URL of the AI service; `None` disables verification and summaries.
    #[serde(default)]
    pub ai_endpoint: Option<String>,
    #[serde(default = "default_ai_timeout")]
    pub ai_timeout_secs: u64,
    /// Percentages at or above this are "Good".
    #[serde(default = "default_at_risk")]
    pub at_risk_threshold: f64,
    /// Percentages below this are "Poor"; in between is "At Risk".
    #[serde(default = "default_poor")]
    pub poor_threshold: f64,
    #[serde(default = "default_report_width")]
    pub report_width: usize,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_ai_timeout() -> u64 {
    30
}
fn default_at_risk() -> f64 {
    75.0
}
fn default_poor() -> f64 {
    50.0
}
fn default_report_width() -> usize {
    80
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            ai_endpoint: None,
            ai_timeout_secs: default_ai_timeout(),
            at_risk_threshold: default_at_risk(),
            poor_threshold: default_poor(),
            report_width: default_report_width(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rattendance")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rattendance")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// An unreadable or malformed file also yields defaults, with a warning.
    pub fn load() -> Self {
        let path = Self::config_file();

        if !path.exists() {
            return Self::default();
        }

        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_yaml::from_str::<Config>(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(cfg) => cfg,
            Err(e) => {
                warning(format!(
                    "Ignoring configuration file {}: {}",
                    path.display(),
                    e
                ));
                Self::default()
            }
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_is_filled_with_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\npoor_threshold: 40\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.poor_threshold, 40.0);
        assert_eq!(cfg.at_risk_threshold, 75.0);
        assert_eq!(cfg.ai_endpoint, None);
        assert_eq!(cfg.ai_timeout_secs, 30);
    }
}
