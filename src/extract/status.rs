//! Reservoir and flood status from the numbered sections "3." and "4.".
//!
//! This matcher assumes the section heading sits on its own line and the status
//! sentence is the very next line. Reports that wrap the heading or put the
//! status on the same line fall back to the canonical phrase. It is kept apart
//! from the numeric station matchers because it is far less reliable.

use crate::error::Result;
use crate::models::{FieldSource, StatusSection};
use regex::Regex;
use tracing::debug;

/// Filler word reports put in front of the status sentence ("is ...").
pub const STATUS_CONNECTOR: &str = "คือ";

/// Words that mark a section as "nothing to report".
pub const CALM_TOKENS: &[&str] = &["ไม่มี", "ปกติ"];

/// How one numbered section is located and what to say when it is not.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRule {
    /// Ordinal marker the section heading starts with, e.g. "3.".
    pub marker: &'static str,
    /// Text used when the section is absent or empty.
    pub fallback: &'static str,
    /// Text used when the caller explicitly raises the alert.
    pub alert_text: &'static str,
}

pub const RESERVOIR_RULE: StatusRule = StatusRule {
    marker: "3.",
    fallback: "ไม่มีอ่างเก็บน้ำในพื้นที่",
    alert_text: "มีอ่างเก็บน้ำที่ต้องเฝ้าระวัง",
};

pub const FLOOD_RULE: StatusRule = StatusRule {
    marker: "4.",
    fallback: "ปกติ ไม่มีรายงานอุทกภัย",
    alert_text: "มีรายงานสถานการณ์อุทกภัย",
};

pub struct StatusMatcher {
    rule: StatusRule,
    section: Regex,
    heading: Regex,
}

impl StatusMatcher {
    pub fn new(rule: StatusRule) -> Result<Self> {
        // Heading line: marker not followed by a digit (so "3.50 ม." is not a heading).
        let section = Regex::new(&format!(
            r"(?m)^[ \t]*{}(?:[^\d\r\n][^\r\n]*)?\r?\n([^\r\n]*)",
            regex::escape(rule.marker)
        ))?;
        // Any numbered heading; a section whose next line is one is empty.
        let heading = Regex::new(r"^\s*\d+\.(?:\D|$)")?;
        Ok(Self {
            rule,
            section,
            heading,
        })
    }

    /// The line after the section heading, cleaned, or the fallback phrase.
    pub fn extract(&self, text: &str) -> StatusSection {
        let found = self
            .section
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|line| !self.heading.is_match(line))
            .map(clean_status_line)
            .filter(|s| !s.is_empty());

        match found {
            Some(text) => StatusSection {
                text,
                source: FieldSource::Matched,
            },
            None => {
                debug!(marker = self.rule.marker, "status section not found, using fallback");
                StatusSection {
                    text: self.rule.fallback.to_string(),
                    source: FieldSource::Defaulted,
                }
            },
        }
    }

    /// A caller-chosen flag expressed as section text.
    pub fn from_flag(&self, alert: bool) -> StatusSection {
        let text = if alert {
            self.rule.alert_text
        } else {
            self.rule.fallback
        };
        StatusSection {
            text: text.to_string(),
            source: FieldSource::Override,
        }
    }
}

/// Alert only when the section was actually read and says something other
/// than "none"/"normal".
pub fn is_alert(section: &StatusSection) -> bool {
    section.source.is_matched() && !CALM_TOKENS.iter().any(|t| section.text.contains(t))
}

fn is_filler(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '•' | '*' | '·' | ':')
}

/// Drops leading bullets and a leading connector only; Thai has no word
/// spaces, so the connector can also appear inside other words.
fn clean_status_line(line: &str) -> String {
    let body = line.trim_start_matches(is_filler);
    let body = body.strip_prefix(STATUS_CONNECTOR).unwrap_or(body);
    body.trim_matches(is_filler)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
