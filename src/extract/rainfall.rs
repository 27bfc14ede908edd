//! Rainfall matcher ("ข้อ 1" of the daily report).

use crate::error::Result;
use crate::models::{FieldSource, Rainfall, NO_VALUE};
use regex::Regex;

/// Phrase the report uses to state that no rain fell.
pub const NO_RAIN_MARKER: &str = "ไม่มีฝน";

/// Unit suffix used when presenting an amount.
pub const RAIN_UNIT: &str = "มม.";

pub struct RainfallMatcher {
    amount: Regex,
}

impl RainfallMatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // Reports write the unit as "ม.ม." and occasionally "มม."
            amount: Regex::new(r"(\d+\.?\d*)\s*(?:ม\.ม\.|มม\.)")?,
        })
    }

    /// An explicit "no rain" wins over any quantity found elsewhere. Without it,
    /// rain is assumed present even when no quantity can be read.
    pub fn extract(&self, text: &str) -> Rainfall {
        if text.contains(NO_RAIN_MARKER) {
            return Rainfall {
                amount: NO_VALUE.to_string(),
                present: false,
                source: FieldSource::Matched,
            };
        }

        match self.amount.captures(text).and_then(|c| c.get(1)) {
            Some(m) => Rainfall {
                amount: format!("{} {}", m.as_str(), RAIN_UNIT),
                present: true,
                source: FieldSource::Matched,
            },
            None => Rainfall {
                amount: NO_VALUE.to_string(),
                present: true,
                source: FieldSource::Defaulted,
            },
        }
    }
}
