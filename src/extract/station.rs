//! Per-station matchers for water level, daily difference and flow.
//!
//! Each station gets its own pair of compiled patterns built from its keywords.
//! Both start at the first keyword occurrence and may run across any amount of
//! intervening prose and line breaks before reaching the value.

use super::numeric::parse_spaced_number;
use crate::error::Result;
use crate::models::{FieldSource, StationProfile, StationReading};
use regex::Regex;
use tracing::debug;

/// A number whose digits may be broken up by whitespace, e.g. "1 0. 5".
const SPACED_NUMBER: &str = r"\d[\d\s]*(?:\.\s*\d[\d\s]*)?";

/// Phrases meaning "volume passing", longest first.
const FLOW_PHRASES: &[&str] = &["มีปริมาณน้ำไหลผ่าน", "ปริมาณน้ำผ่าน", "ปริมาณ"];

/// Spellings of m³/s seen in reports, including the "ลม.ม/วินาที" typo.
const FLOW_UNITS: &[&str] = &["ลบ.ม./วินาที", "ลบ.ม./วิ", "ลม.ม/วินาที"];

pub struct StationMatcher {
    id: String,
    level_diff: Regex,
    flow: Regex,
}

fn alternation(words: &[impl AsRef<str>]) -> String {
    words
        .iter()
        .map(|w| w.as_ref().trim())
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

impl StationMatcher {
    pub fn new(profile: &StationProfile) -> Result<Self> {
        let keys = alternation(profile.keywords.as_slice());

        let level_diff = Regex::new(&format!(
            r"(?is)(?:{keys}).*?ระดับน้ำ\s*\+\s*({num}).*?\(\s*([+\-]?\s*{num})\s*ม\.\)",
            keys = keys,
            num = SPACED_NUMBER,
        ))?;

        let flow = Regex::new(&format!(
            r"(?is)(?:{keys}).*?(?:{phrases})\s*([\d.\-\s,]+)\s*(?:{units})",
            keys = keys,
            phrases = alternation(FLOW_PHRASES),
            units = alternation(FLOW_UNITS),
        ))?;

        Ok(Self {
            id: profile.id.clone(),
            level_diff,
            flow,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Level and signed difference, or `None` if the pattern is absent or the
    /// captured numbers do not parse.
    pub fn level_diff(&self, text: &str) -> Option<(f64, f64)> {
        let caps = self.level_diff.captures(text)?;
        let level = parse_spaced_number(caps.get(1)?.as_str());
        let diff = parse_spaced_number(caps.get(2)?.as_str());

        match (level, diff) {
            (Some(level), Some(diff)) => Some((level, diff)),
            _ => {
                debug!(
                    station = %self.id,
                    "level/diff pattern matched but numbers did not parse: {:?}",
                    caps.get(0).map(|m| m.as_str())
                );
                None
            },
        }
    }

    /// Flow text as written (may be a range such as "120-130"), trimmed.
    pub fn flow(&self, text: &str) -> Option<String> {
        let caps = self.flow.captures(text)?;
        let value = caps.get(1)?.as_str().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Runs both matchers and fills in defaults for whatever did not match.
    pub fn read(&self, text: &str) -> StationReading {
        let mut reading = StationReading::defaulted();

        if let Some((level, diff)) = self.level_diff(text) {
            reading.level = level;
            reading.diff = diff;
            reading.level_source = FieldSource::Matched;
        }

        if let Some(flow) = self.flow(text) {
            reading.flow = flow;
            reading.flow_source = FieldSource::Matched;
        }

        debug!(
            station = %self.id,
            level = reading.level,
            diff = reading.diff,
            flow = %reading.flow,
            level_source = ?reading.level_source,
            flow_source = ?reading.flow_source,
            "station reading extracted"
        );

        reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn c7a() -> StationMatcher {
        StationMatcher::new(&StationProfile::new("c7a", "C.7A", &["C7A", "C.7A"], 10.0, 12.0))
            .expect("station pattern compiles")
    }

    fn wat() -> StationMatcher {
        StationMatcher::new(&StationProfile::new("wat", "วัดตูม", &["วัดตูม"], 6.5, 8.0))
            .expect("station pattern compiles")
    }

    #[test]
    fn test_level_and_diff_with_intervening_prose() {
        let text = "C7A ... ระดับน้ำ +1.46 ... (+0.02 ม.)";
        assert_eq!(c7a().level_diff(text), Some((1.46, 0.02)));
    }

    #[test]
    fn test_level_and_diff_across_lines_case_insensitive() {
        let text = "สถานี c.7a อ.เมือง จ.อ่างทอง\nวันนี้ระดับน้ำ + 1.52 ม.รทก.\nเทียบกับเมื่อวาน\n( -0.05 ม.)";
        assert_eq!(c7a().level_diff(text), Some((1.52, -0.05)));
    }

    #[test]
    fn test_level_with_embedded_whitespace() {
        let text = "วัดตูม ระดับน้ำ +1 0. 5 ม.รทก. (+0. 1 ม.)";
        assert_eq!(wat().level_diff(text), Some((10.5, 0.1)));
    }

    #[test]
    fn test_keyword_without_level_phrase_defaults() {
        let reading = wat().read("2. สถานีวัดตูม ไม่มีรายงาน");
        assert_eq!((reading.level, reading.diff), (0.0, 0.0));
        assert_eq!(reading.level_source, FieldSource::Defaulted);
    }

    #[test]
    fn test_level_phrase_before_keyword_does_not_count() {
        let reading = wat().read("ระดับน้ำ +6.10 ม.รทก. (+0.10 ม.) แล้วจึงถึงวัดตูม");
        assert_eq!(reading.level_source, FieldSource::Defaulted);
    }

    #[test]
    fn test_skips_parenthesis_that_is_not_a_diff() {
        let text = "วัดตูม ระดับน้ำ +6.12 (ม.รทก.) ลดลง (-0.08 ม.)";
        assert_eq!(wat().level_diff(text), Some((6.12, -0.08)));
    }

    #[rstest]
    #[case("C7A ปริมาณ 130 ลบ.ม./วิ", "130")]
    #[case("C7A ปริมาณ 130 ลม.ม/วินาที", "130")]
    #[case("C7A มีปริมาณน้ำไหลผ่าน 1,250 ลบ.ม./วินาที", "1,250")]
    #[case("C.7A\nปริมาณน้ำผ่าน 120-135 ลบ.ม./วิ", "120-135")]
    #[case("C7A ปริมาณ 1 30 ลบ.ม./วิ", "1 30")]
    fn test_flow_variants(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(c7a().flow(text).as_deref(), Some(expected));
    }

    #[test]
    fn test_flow_missing_unit_defaults_to_dash() {
        let reading = c7a().read("C7A ปริมาณ 130 คิว");
        assert_eq!(reading.flow, "-");
        assert_eq!(reading.flow_source, FieldSource::Defaulted);
    }

    #[test]
    fn test_flow_placeholder_dash_is_kept() {
        assert_eq!(c7a().flow("C7A ปริมาณ - ลบ.ม./วิ").as_deref(), Some("-"));
    }

    #[test]
    fn test_flow_blank_value_is_no_match() {
        assert_eq!(c7a().flow("C7A ปริมาณ ลบ.ม./วิ"), None);
    }

    #[test]
    fn test_read_full_station() {
        let text = "C7A ระดับน้ำ +1.46 ม.รทก. (+0.02 ม.) ปริมาณน้ำผ่าน 130 ลบ.ม./วินาที";
        let reading = c7a().read(text);
        assert_eq!(reading.level, 1.46);
        assert_eq!(reading.diff, 0.02);
        assert_eq!(reading.flow, "130");
        assert!(reading.level_source.is_matched());
        assert!(reading.flow_source.is_matched());
    }

    #[test]
    fn test_keywords_are_escaped() {
        // "C.7A" must not match "CX7A"
        let m = StationMatcher::new(&StationProfile::new("c7a", "C.7A", &["C.7A"], 10.0, 12.0))
            .unwrap();
        assert_eq!(m.level_diff("CX7A ระดับน้ำ +1.46 (+0.02 ม.)"), None);
    }
}
