//! Gauge geometry for a station card.
//!
//! The infographic draws each station as a vertical tube filled to the current
//! level, with a red line at the bank-full elevation. Everything here is pure
//! arithmetic on a profile and a reading so the renderer only has to scale.

use crate::models::{StationProfile, StationReading};

/// Direction of the day-on-day change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Steady,
}

impl Trend {
    pub fn from_diff(diff: f64) -> Self {
        if diff > 0.0 {
            Trend::Rising
        } else if diff < 0.0 {
            Trend::Falling
        } else {
            Trend::Steady
        }
    }
}

/// Everything needed to draw one station card.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeView {
    pub label: String,
    /// Fraction of the tube filled, clamped to `0.0..=1.0`.
    pub fill_ratio: f64,
    /// Height of the bank line as a fraction of the tube.
    pub bank_ratio: f64,
    pub trend: Trend,
    pub above_bank: bool,
    /// Metres left before bank-full; negative once the bank is overtopped.
    pub freeboard: f64,
    pub level_text: String,
    pub diff_text: String,
}

impl GaugeView {
    pub fn new(profile: &StationProfile, reading: &StationReading) -> Self {
        Self {
            label: profile.label.clone(),
            fill_ratio: (reading.level / profile.max).clamp(0.0, 1.0),
            bank_ratio: profile.bank / profile.max,
            trend: Trend::from_diff(reading.diff),
            above_bank: reading.level > profile.bank,
            freeboard: profile.bank - reading.level,
            level_text: format!("+{:.2} ม.รทก.", reading.level),
            diff_text: format!("({:+.2} ม.)", reading.diff),
        }
    }
}
