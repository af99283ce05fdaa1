//! Maps OpenWeather icon codes onto the meteocons font used by the panel.

/// Glyph shown when no known condition matches.
pub const UNKNOWN_GLYPH: char = ')';

/// OpenWeather icon prefixes, in table order. Order matters for matching.
pub const CONDITION_CODES: [&str; 9] = [
    "01", // clear sky
    "02", // few clouds
    "03", // scattered clouds
    "04", // broken clouds
    "09", // shower rain
    "10", // rain
    "11", // thunderstorm
    "13", // snow
    "50", // mist
];

/// Font glyph for each entry of [`CONDITION_CODES`].
pub const CONDITION_GLYPHS: [char; 9] = ['B', 'H', 'N', 'Y', 'Q', 'R', 'O', 'W', 'L'];

/// Glyph for a provider condition code such as `"10d"`.
///
/// The table is scanned from the last entry to the first and the first
/// prefix hit wins. Anything unmatched yields [`UNKNOWN_GLYPH`].
pub fn condition_code_to_glyph(code: &str) -> char {
    CONDITION_CODES
        .iter()
        .zip(CONDITION_GLYPHS)
        .rev()
        .find(|(prefix, _)| code.starts_with(*prefix))
        .map(|(_, glyph)| glyph)
        .unwrap_or(UNKNOWN_GLYPH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_and_night_variants_share_a_glyph() {
        assert_eq!(condition_code_to_glyph("10d"), 'R');
        assert_eq!(condition_code_to_glyph("10n"), 'R');
        assert_eq!(condition_code_to_glyph("01d"), 'B');
        assert_eq!(condition_code_to_glyph("50n"), 'L');
    }

    #[test]
    fn bare_codes_match() {
        for (code, glyph) in CONDITION_CODES.iter().zip(CONDITION_GLYPHS) {
            assert_eq!(condition_code_to_glyph(code), glyph);
        }
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(condition_code_to_glyph(""), UNKNOWN_GLYPH);
        assert_eq!(condition_code_to_glyph("12d"), UNKNOWN_GLYPH);
        assert_eq!(condition_code_to_glyph("1"), UNKNOWN_GLYPH);
        assert_eq!(condition_code_to_glyph("d10"), UNKNOWN_GLYPH);
    }

    #[test]
    fn fallback_is_distinct_from_every_condition() {
        assert!(!CONDITION_GLYPHS.contains(&UNKNOWN_GLYPH));
    }
}
