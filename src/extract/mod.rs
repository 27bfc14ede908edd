//! Turns a pasted daily report into a `ReportRecord`.
//!
//! The extractor is built once from a `StationTable`; building compiles every
//! pattern and is the only step that can fail. After that `extract` is total:
//! each field is filled by its own matcher and falls back to a fixed default
//! when the matcher finds nothing.
//!
//! Submodules:
//! - `rainfall`: "no rain" marker and rainfall amount.
//! - `station`: per-station level/diff and flow.
//! - `status`: reservoir/flood sections (line-offset heuristic).
//! - `date`: stated report date and the Thai-calendar fallback.
//! - `numeric`: whitespace-tolerant number parsing.

mod date;
mod numeric;
mod rainfall;
mod station;
mod status;

pub use date::{thai_date, DateMatcher, THAI_MONTHS};
pub use numeric::parse_spaced_number;
pub use rainfall::{RainfallMatcher, NO_RAIN_MARKER, RAIN_UNIT};
pub use station::StationMatcher;
pub use status::{is_alert, StatusMatcher, StatusRule, FLOOD_RULE, RESERVOIR_RULE};

use crate::error::Result;
use crate::models::{
    FieldSource, ManualFlags, ReportRecord, StationOverride, StationReading, StationReadings,
    StationTable,
};
use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use tracing::{debug, info, warn};

struct Station {
    matcher: StationMatcher,
    primary: bool,
}

/// Compiled matchers for one station table.
pub struct Extractor {
    stations: Vec<Station>,
    rainfall: RainfallMatcher,
    date: DateMatcher,
    reservoir: StatusMatcher,
    flood: StatusMatcher,
}

impl Extractor {
    /// Compiles matchers for every station in `table`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Pattern` if a station's keywords produce an invalid pattern.
    pub fn new(table: &StationTable) -> Result<Self> {
        let stations = table
            .stations()
            .iter()
            .map(|profile| {
                Ok(Station {
                    matcher: StationMatcher::new(profile)?,
                    primary: profile.primary,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Compiled matchers for {} stations", stations.len());

        Ok(Self {
            stations,
            rainfall: RainfallMatcher::new()?,
            date: DateMatcher::new()?,
            reservoir: StatusMatcher::new(RESERVOIR_RULE)?,
            flood: StatusMatcher::new(FLOOD_RULE)?,
        })
    }

    /// Extracts a record, using the local date if the report does not state one.
    pub fn extract(
        &self,
        text: &str,
        primary_override: Option<&StationOverride>,
        manual: ManualFlags,
    ) -> ReportRecord {
        self.extract_on(text, primary_override, manual, Local::now().date_naive())
    }

    /// Same as [`Extractor::extract`] with the fallback date supplied by the caller,
    /// which makes the result fully deterministic.
    pub fn extract_on(
        &self,
        text: &str,
        primary_override: Option<&StationOverride>,
        manual: ManualFlags,
        today: NaiveDate,
    ) -> ReportRecord {
        let (date, date_source) = match self.date.extract(text) {
            Some(date) => (date, FieldSource::Matched),
            None => (thai_date(today), FieldSource::Defaulted),
        };

        let rainfall = self.rainfall.extract(text);
        let stations = self.read_stations(text, primary_override);

        let reservoir_status = match manual.reservoir {
            Some(flag) => self.reservoir.from_flag(flag),
            None => self.reservoir.extract(text),
        };
        let flood_status = match manual.flood {
            Some(flag) => self.flood.from_flag(flag),
            None => self.flood.extract(text),
        };
        let reservoir_alert = manual.reservoir.unwrap_or_else(|| is_alert(&reservoir_status));
        let flood_alert = manual.flood.unwrap_or_else(|| is_alert(&flood_status));

        let record = ReportRecord {
            date,
            date_source,
            rainfall,
            stations,
            reservoir_alert,
            flood_alert,
            reservoir_status,
            flood_status,
        };

        info!(
            "Extracted report for {} ({} stations, {} defaulted fields)",
            record.date,
            record.stations.len(),
            record.defaulted_field_count()
        );

        record
    }

    /// Station readings in table order. Stations are independent, so they are
    /// read in parallel; `collect` keeps table order.
    fn read_stations(
        &self,
        text: &str,
        primary_override: Option<&StationOverride>,
    ) -> StationReadings {
        let active_override = primary_override.filter(|o| o.enabled);

        if active_override.is_some() && !self.stations.iter().any(|s| s.primary) {
            warn!("Override supplied but the station table has no primary station; ignoring it");
        }

        let readings: Vec<(String, StationReading)> = self
            .stations
            .par_iter()
            .map(|station| {
                let reading = match active_override {
                    Some(o) if station.primary => {
                        debug!(station = %station.matcher.id(), "using override reading");
                        StationReading::from(o)
                    },
                    _ => station.matcher.read(text),
                };
                (station.matcher.id().to_string(), reading)
            })
            .collect();

        readings.into_iter().collect()
    }
}
