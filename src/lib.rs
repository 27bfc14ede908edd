//! Extracts structured readings from the daily irrigation status report that
//! field offices paste into chat: rainfall, per-station water level, daily
//! change and flow, plus the reservoir and flood sections.
//!
//! ```no_run
//! use irrigation_report::extract::Extractor;
//! use irrigation_report::models::{ManualFlags, StationTable};
//!
//! let extractor = Extractor::new(&StationTable::builtin())?;
//! let record = extractor.extract("C7A ระดับน้ำ +1.46 ม.รทก. (+0.02 ม.)", None, ManualFlags::default());
//! assert_eq!(record.stations.get("c7a").map(|r| r.level), Some(1.46));
//! # Ok::<(), irrigation_report::error::AppError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod gauge;
pub mod logging;
pub mod models;
