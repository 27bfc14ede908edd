//! Station profiles: the static, per-station configuration that drives extraction
//! and gauge display.
//!
//! A `StationTable` is built once at start-up (built-in or from a TOML file, see
//! `config`) and handed to the extractor. Its order is the canonical display order.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for a single monitoring station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationProfile {
    /// Short stable key used in the report record (e.g. "c7a").
    pub id: String,
    /// Display label drawn on the station card.
    pub label: String,
    /// Names the daily report uses for this station. Any of them may
    /// introduce the station's readings.
    pub keywords: Vec<String>,
    /// Bank-full elevation (ม.รทก.); readings above it indicate overflow risk.
    pub bank: f64,
    /// Top of the gauge scale (ม.รทก.).
    pub max: f64,
    /// The telemetry station whose reading may be overridden by hand.
    #[serde(default)]
    pub primary: bool,
}

impl StationProfile {
    pub fn new(id: &str, label: &str, keywords: &[&str], bank: f64, max: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            bank,
            max,
            primary: false,
        }
    }

    pub fn as_primary(mut self) -> Self {
        self.primary = true;
        self
    }
}

/// The ordered, validated set of stations a report is extracted against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationTable {
    #[serde(rename = "station")]
    stations: Vec<StationProfile>,
}

impl StationTable {
    /// Builds a table, rejecting it if any invariant is violated.
    pub fn new(stations: Vec<StationProfile>) -> Result<Self> {
        let table = Self { stations };
        table.validate()?;
        Ok(table)
    }

    /// The three stations covered by the Ang Thong daily report: the Chao Phraya
    /// telemetry gauge at C.7A and the two Noi River gauges.
    pub fn builtin() -> Self {
        Self {
            stations: vec![
                StationProfile::new("c7a", "C.7A เจ้าพระยา", &["C7A", "C.7A"], 10.00, 12.0)
                    .as_primary(),
                StationProfile::new("wat", "แม่น้ำน้อย (วัดตูม)", &["วัดตูม"], 6.50, 8.0),
                StationProfile::new("bak", "แม่น้ำน้อย (บางจัก)", &["บางจัก"], 5.00, 6.5),
            ],
        }
    }

    /// Checks the invariants every consumer relies on.
    pub fn validate(&self) -> Result<()> {
        if self.stations.is_empty() {
            return Err(AppError::Config("station table is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for s in &self.stations {
            if s.id.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "station '{}' has an empty id",
                    s.label
                )));
            }
            if !seen.insert(s.id.as_str()) {
                return Err(AppError::Config(format!("duplicate station id '{}'", s.id)));
            }
            if s.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(AppError::Config(format!(
                    "station '{}' has no keywords",
                    s.id
                )));
            }
            if !s.bank.is_finite() || !s.max.is_finite() || s.max <= 0.0 {
                return Err(AppError::Config(format!(
                    "station '{}' needs finite bank/max with max > 0",
                    s.id
                )));
            }
            if s.bank > s.max {
                return Err(AppError::Config(format!(
                    "bank {:.2} above max {:.2} for station '{}'",
                    s.bank, s.max, s.id
                )));
            }
        }

        let primaries = self.stations.iter().filter(|s| s.primary).count();
        if primaries > 1 {
            return Err(AppError::Config(format!(
                "{} stations marked primary, at most one allowed",
                primaries
            )));
        }

        Ok(())
    }

    pub fn stations(&self) -> &[StationProfile] {
        &self.stations
    }

    /// The station an override applies to, if the table designates one.
    pub fn primary(&self) -> Option<&StationProfile> {
        self.stations.iter().find(|s| s.primary)
    }

    pub fn find(&self, id: &str) -> Option<&StationProfile> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for StationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        StationTable::builtin()
            .validate()
            .expect("built-in table must satisfy its own invariants");
    }

    #[test]
    fn test_builtin_table_canonical_order() {
        let ids: Vec<_> = StationTable::builtin()
            .stations()
            .iter()
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(ids, vec!["c7a", "wat", "bak"]);
    }

    #[test]
    fn test_bank_never_above_max_in_builtin() {
        for s in StationTable::builtin().stations() {
            assert!(
                s.bank <= s.max,
                "bank must not exceed gauge max for '{}'",
                s.label
            );
        }
    }

    #[test]
    fn test_builtin_primary_is_c7a() {
        let table = StationTable::builtin();
        let primary = table.primary().expect("built-in table has a primary station");
        assert_eq!(primary.id, "c7a");
        assert!(primary.keywords.iter().any(|k| k == "C7A"));
    }

    #[test]
    fn test_find_returns_none_for_unknown_id() {
        assert!(StationTable::builtin().find("nowhere").is_none());
        assert_eq!(StationTable::builtin().find("bak").map(|s| s.bank), Some(5.0));
    }

    #[test]
    fn test_rejects_bank_above_max() {
        let err = StationTable::new(vec![StationProfile::new("x", "X", &["X"], 9.0, 8.0)])
            .unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("above max")));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = StationTable::new(vec![
            StationProfile::new("x", "X", &["X"], 1.0, 2.0),
            StationProfile::new("x", "Y", &["Y"], 1.0, 2.0),
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_rejects_two_primaries() {
        let err = StationTable::new(vec![
            StationProfile::new("x", "X", &["X"], 1.0, 2.0).as_primary(),
            StationProfile::new("y", "Y", &["Y"], 1.0, 2.0).as_primary(),
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("primary")));
    }

    #[test]
    fn test_rejects_missing_keywords_and_empty_table() {
        assert!(StationTable::new(vec![]).is_err());
        assert!(StationTable::new(vec![StationProfile::new("x", "X", &[" "], 1.0, 2.0)]).is_err());
    }

    #[test]
    fn test_table_without_primary_is_allowed() {
        let table = StationTable::new(vec![StationProfile::new("x", "X", &["X"], 1.0, 2.0)])
            .expect("primary station is optional");
        assert!(table.primary().is_none());
    }
}
