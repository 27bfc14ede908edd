//! Runtime configuration: environment variables (optionally from `.env`) and the
//! station table file.
//!
//! Station tables use the same `[[station]]` layout as the pack's TOML station
//! registries:
//!
//! ```toml
//! [[station]]
//! id = "c7a"
//! label = "C.7A เจ้าพระยา"
//! keywords = ["C7A", "C.7A"]
//! bank = 10.0
//! max = 12.0
//! primary = true
//! ```

use crate::error::{AppError, Result};
use crate::models::StationTable;
use std::env::{self, VarError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Path to a TOML station table. Unset means the built-in table.
pub const STATIONS_FILE_VAR: &str = "IRRIGATION_STATIONS_FILE";

/// Directory for the rolling log file. Unset means console only.
pub const LOG_DIR_VAR: &str = "IRRIGATION_LOG_DIR";

/// Settings resolved once at start-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub stations_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Reads settings from the process environment after loading `.env`, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Env` if a variable is set but is not valid unicode.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Ok(Self {
            stations_file: non_empty_var(STATIONS_FILE_VAR)?.map(PathBuf::from),
            log_dir: non_empty_var(LOG_DIR_VAR)?.map(PathBuf::from),
        })
    }

    /// A CLI-supplied path wins over the environment.
    pub fn with_stations_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.stations_file = path;
        }
        self
    }

    /// Loads the configured station table, or the built-in one.
    pub fn station_table(&self) -> Result<StationTable> {
        match &self.stations_file {
            Some(path) => load_station_table(path),
            None => {
                debug!("No station file configured, using built-in table");
                Ok(StationTable::builtin())
            },
        }
    }
}

fn non_empty_var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(v) => Ok(Some(v).filter(|v| !v.trim().is_empty())),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Reads and validates a TOML station table from disk.
pub fn load_station_table(path: &Path) -> Result<StationTable> {
    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!(
            "cannot read station file {}: {}",
            path.display(),
            e
        ))
    })?;
    let table = parse_station_table(&contents)?;
    info!(
        "Loaded {} stations from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Parses and validates a TOML station table.
pub fn parse_station_table(contents: &str) -> Result<StationTable> {
    let table: StationTable = toml::from_str(contents)?;
    table.validate()?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const TWO_STATIONS: &str = r#"
[[station]]
id = "up"
label = "Upstream"
keywords = ["UP1", "U.P1"]
bank = 4.5
max = 6.0
primary = true

[[station]]
id = "down"
label = "Downstream"
keywords = ["DN2"]
bank = 3.0
max = 5.0
"#;

    #[test]
    fn test_parse_station_table_keeps_file_order() {
        let table = parse_station_table(TWO_STATIONS).expect("valid table");
        let ids: Vec<_> = table.stations().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["up", "down"]);
        assert_eq!(table.primary().map(|s| s.id.as_str()), Some("up"));
        assert!(!table.stations()[1].primary, "primary defaults to false");
    }

    #[test]
    fn test_parse_station_table_rejects_bank_above_max() {
        let bad = r#"
[[station]]
id = "x"
label = "X"
keywords = ["X"]
bank = 7.0
max = 6.0
"#;
        assert!(matches!(parse_station_table(bad), Err(AppError::Config(_))));
    }

    #[test]
    fn test_parse_station_table_rejects_malformed_toml() {
        assert!(matches!(
            parse_station_table("[[station]]\nid = "),
            Err(AppError::Toml(_))
        ));
    }

    #[test]
    fn test_load_station_table_from_disk() {
        let path = env::temp_dir().join(format!("irrigation-stations-{}.toml", std::process::id()));
        fs::write(&path, TWO_STATIONS).unwrap();
        let table = load_station_table(&path).expect("file should load");
        fs::remove_file(&path).ok();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_station_table_missing_file_is_config_error() {
        let err = load_station_table(Path::new("/definitely/not/here/stations.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("cannot read")));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        env::set_var(STATIONS_FILE_VAR, "/etc/irrigation/stations.toml");
        env::set_var(LOG_DIR_VAR, "  ");
        let config = AppConfig::from_env().unwrap();
        env::remove_var(STATIONS_FILE_VAR);
        env::remove_var(LOG_DIR_VAR);

        assert_eq!(
            config.stations_file,
            Some(PathBuf::from("/etc/irrigation/stations.toml"))
        );
        assert_eq!(config.log_dir, None, "blank values count as unset");
    }

    #[test]
    #[serial]
    fn test_cli_path_overrides_env() {
        env::set_var(STATIONS_FILE_VAR, "/from/env.toml");
        let config = AppConfig::from_env()
            .unwrap()
            .with_stations_file(Some(PathBuf::from("/from/cli.toml")));
        env::remove_var(STATIONS_FILE_VAR);
        assert_eq!(config.stations_file, Some(PathBuf::from("/from/cli.toml")));
    }

    #[test]
    fn test_default_config_uses_builtin_table() {
        let table = AppConfig::default().station_table().unwrap();
        assert_eq!(table, StationTable::builtin());
    }
}
