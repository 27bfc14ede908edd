//! Defines the per-request data structures produced by the extractor.
//!
//! Includes structs for:
//! - Caller inputs that bypass text extraction (`StationOverride`, `ManualFlags`).
//! - The extracted values themselves (`StationReading`, `Rainfall`, `StatusSection`).
//! - The assembled `ReportRecord` handed to the renderer.

use serde::{Deserialize, Serialize, Serializer};

/// Placeholder used for free-text fields that could not be located in the report.
pub const NO_VALUE: &str = "-";

/// Where a record field got its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// A pattern matched and the value was read from the report text.
    Matched,
    /// No usable match; the documented fallback value was used.
    Defaulted,
    /// The caller supplied the value directly.
    Override,
}

impl FieldSource {
    pub fn is_matched(self) -> bool {
        self == FieldSource::Matched
    }
}

// --- Caller inputs ---

/// Manually entered readings for the primary (telemetry) station.
///
/// Substitution is all-or-nothing: when enabled, level, diff and flow all
/// come from here and the station's text extraction is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationOverride {
    pub level: f64,
    pub diff: f64,
    pub flow: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl StationOverride {
    /// Creates an enabled override.
    pub fn new(level: f64, diff: f64, flow: impl Into<String>) -> Self {
        Self {
            level,
            diff,
            flow: flow.into(),
            enabled: true,
        }
    }
}

/// Explicit reservoir/flood selections. A `Some` value supersedes text extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualFlags {
    pub reservoir: Option<bool>,
    pub flood: Option<bool>,
}

// --- Extracted values ---

/// One station's reading for the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReading {
    /// Water surface elevation in metres above the reference datum (ม.รทก.).
    pub level: f64,
    /// Signed change against the previous reading, in metres.
    pub diff: f64,
    /// Discharge as written in the report (may be a range or "-").
    pub flow: String,
    /// Provenance of the level/diff pair; they always match or default together.
    pub level_source: FieldSource,
    pub flow_source: FieldSource,
}

impl StationReading {
    /// A reading where nothing could be extracted.
    pub fn defaulted() -> Self {
        Self {
            level: 0.0,
            diff: 0.0,
            flow: NO_VALUE.to_string(),
            level_source: FieldSource::Defaulted,
            flow_source: FieldSource::Defaulted,
        }
    }
}

impl From<&StationOverride> for StationReading {
    fn from(o: &StationOverride) -> Self {
        Self {
            level: o.level,
            diff: o.diff,
            flow: o.flow.clone(),
            level_source: FieldSource::Override,
            flow_source: FieldSource::Override,
        }
    }
}

/// Accumulated rainfall as stated in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rainfall {
    /// `"<number> มม."` when a quantity was found, otherwise `"-"`.
    pub amount: String,
    /// `false` only when the report explicitly says there was no rain.
    pub present: bool,
    pub source: FieldSource,
}

/// Free text of one numbered status section (reservoir or flood).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSection {
    pub text: String,
    pub source: FieldSource,
}

/// Station readings keyed by station id, in canonical display order.
///
/// Serializes as a JSON object whose key order follows the station table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationReadings(Vec<(String, StationReading)>);

impl StationReadings {
    pub fn get(&self, id: &str) -> Option<&StationReading> {
        self.0.iter().find(|(k, _)| k == id).map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StationReading)> {
        self.0.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, StationReading)> for StationReadings {
    fn from_iter<I: IntoIterator<Item = (String, StationReading)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for StationReadings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, r)| (k, r)))
    }
}

/// Everything the renderer needs for one daily infographic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRecord {
    pub date: String,
    pub date_source: FieldSource,
    pub rainfall: Rainfall,
    pub stations: StationReadings,
    pub reservoir_alert: bool,
    pub flood_alert: bool,
    pub reservoir_status: StatusSection,
    pub flood_status: StatusSection,
}

impl ReportRecord {
    /// Number of fields that fell back to a default, for logging and display.
    pub fn defaulted_field_count(&self) -> usize {
        let station_fields = self
            .stations
            .iter()
            .map(|(_, r)| {
                usize::from(r.level_source == FieldSource::Defaulted)
                    + usize::from(r.flow_source == FieldSource::Defaulted)
            })
            .sum::<usize>();

        station_fields
            + usize::from(self.date_source == FieldSource::Defaulted)
            + usize::from(self.rainfall.source == FieldSource::Defaulted)
            + usize::from(self.reservoir_status.source == FieldSource::Defaulted)
            + usize::from(self.flood_status.source == FieldSource::Defaulted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(level: f64) -> StationReading {
        StationReading {
            level,
            diff: 0.0,
            flow: NO_VALUE.to_string(),
            level_source: FieldSource::Matched,
            flow_source: FieldSource::Defaulted,
        }
    }

    #[test]
    fn test_override_reading_takes_all_three_fields() {
        let o = StationOverride::new(1.46, 0.02, "130");
        let r = StationReading::from(&o);
        assert_eq!(r.level, 1.46);
        assert_eq!(r.diff, 0.02);
        assert_eq!(r.flow, "130");
        assert_eq!(r.level_source, FieldSource::Override);
        assert_eq!(r.flow_source, FieldSource::Override);
    }

    #[test]
    fn test_override_enabled_defaults_to_true_when_deserialized() {
        let o: StationOverride =
            serde_json::from_str(r#"{"level": 2.0, "diff": -0.1, "flow": "90"}"#).unwrap();
        assert!(o.enabled);
    }

    #[test]
    fn test_station_readings_serialize_in_insertion_order() {
        let readings: StationReadings = vec![
            ("zeta".to_string(), reading(3.0)),
            ("alpha".to_string(), reading(1.0)),
            ("mid".to_string(), reading(2.0)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&readings).unwrap();
        let zeta = json.find("\"zeta\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        let mid = json.find("\"mid\"").unwrap();
        assert!(zeta < alpha && alpha < mid, "order not preserved: {}", json);
        assert_eq!(readings.ids(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_station_readings_get() {
        let readings: StationReadings = vec![("wat".to_string(), reading(6.1))]
            .into_iter()
            .collect();
        assert_eq!(readings.get("wat").map(|r| r.level), Some(6.1));
        assert!(readings.get("bak").is_none());
    }

    #[test]
    fn test_field_source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FieldSource::Defaulted).unwrap(),
            "\"defaulted\""
        );
    }
}
