//! Number clean-up shared by the station matchers.

/// Parses a number captured from report text.
///
/// Reports are pasted from chat apps and sometimes OCR, so digits can be split
/// by stray spaces or line breaks ("1 0. 5") and may be written in Thai numerals.
/// All whitespace is removed and Thai digits are mapped to ASCII before parsing.
/// Returns `None` when what is left is still not a number.
pub fn parse_spaced_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(thai_digit_to_ascii)
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn thai_digit_to_ascii(c: char) -> char {
    match c {
        '\u{0E50}'..='\u{0E59}' => {
            // ๐..๙ are contiguous, same as 0..9
            char::from(b'0' + (c as u32 - 0x0E50) as u8)
        },
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.46", Some(1.46))]
    #[case("1 0. 5", Some(10.5))]
    #[case(" 6.12\n", Some(6.12))]
    #[case("+0.02", Some(0.02))]
    #[case("- 0.15", Some(-0.15))]
    #[case("๑.๔๖", Some(1.46))]
    #[case("12", Some(12.0))]
    fn test_parse_spaced_number(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_spaced_number(raw), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("1.2.3")]
    #[case("+")]
    #[case("abc")]
    fn test_parse_spaced_number_rejects(#[case] raw: &str) {
        assert_eq!(parse_spaced_number(raw), None);
    }
}
