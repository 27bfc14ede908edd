//! Report date: taken from the text when stated, otherwise today's date in the
//! Thai calendar.

use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Thai month names, January first.
pub const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Buddhist Era years run 543 ahead of the Gregorian calendar.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Formats a date the way the infographic header shows it, e.g. "16 ตุลาคม 2569".
pub fn thai_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        THAI_MONTHS[date.month0() as usize],
        date.year() + BUDDHIST_ERA_OFFSET
    )
}

pub struct DateMatcher {
    stated: Regex,
}

impl DateMatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // "ประจำวันที่ ..." or "ณ วันที่ ...", value runs to the end of the line
            stated: Regex::new(r"(?:ประจำวันที่|ณ\s*วันที่)[ \t:]*([^\r\n]*)")?,
        })
    }

    /// The date as written after the first "for date" marker, if it is not blank.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.stated
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
