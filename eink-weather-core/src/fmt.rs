//! Timestamp and fixed-width text helpers for the monospace panel fonts.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};

use crate::i18n::Language;

/// Formats Unix timestamps as local time for one offset and language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFormatter {
    offset: FixedOffset,
    language: Language,
}

impl TextFormatter {
    /// Offsets outside +-24h fall back to UTC.
    pub fn new(utc_offset_seconds: i32, language: Language) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_seconds).unwrap_or_else(|| Utc.fix());
        Self { offset, language }
    }

    pub fn utc_offset_seconds(&self) -> i32 {
        self.offset.local_minus_utc()
    }

    fn local(&self, timestamp: i64) -> DateTime<FixedOffset> {
        DateTime::<Utc>::from_timestamp(timestamp, 0)
            .unwrap_or_default()
            .with_timezone(&self.offset)
    }

    pub fn weekday(&self, timestamp: i64) -> &'static str {
        self.language.weekday(self.local(timestamp).weekday())
    }

    /// `HH:MM`
    pub fn hour_minute(&self, timestamp: i64) -> String {
        self.local(timestamp).format("%H:%M").to_string()
    }

    /// `DD/MM`
    pub fn day_month(&self, timestamp: i64) -> String {
        self.local(timestamp).format("%d/%m").to_string()
    }

    /// `HH:MM DD/MM/YY`
    pub fn date_time(&self, timestamp: i64) -> String {
        self.local(timestamp).format("%H:%M %d/%m/%y").to_string()
    }

    /// `HH`
    pub fn hour(&self, timestamp: i64) -> String {
        self.local(timestamp).format("%H").to_string()
    }

    /// `HH:MM Su DD/MM`, or `HH:MM!Su DD/MM` when the data shown is not fresh.
    pub fn header_datetime(&self, timestamp: i64, updated: bool) -> String {
        let t = self.local(timestamp);
        let separator = if updated { ' ' } else { '!' };
        format!(
            "{:02}:{:02}{}{} {:02}/{:02}",
            t.hour(),
            t.minute(),
            separator,
            self.language.weekday(t.weekday()),
            t.day(),
            t.month(),
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(0, Language::default())
    }
}

/// Pads on the right with spaces to `width` chars, truncating longer text.
pub fn right_pad(text: &str, width: usize) -> String {
    right_pad_with(text, width, ' ')
}

pub fn right_pad_with(text: &str, width: usize, pad: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let mut out = String::with_capacity(width);
    out.push_str(text);
    out.extend(std::iter::repeat_n(pad, width - len));
    out
}

/// Pads on the left with spaces to `width` chars, truncating longer text.
pub fn left_pad(text: &str, width: usize) -> String {
    left_pad_with(text, width, ' ')
}

pub fn left_pad_with(text: &str, width: usize, pad: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let mut out: String = std::iter::repeat_n(pad, width - len).collect();
    out.push_str(text);
    out
}

/// Upper-cases the first character only.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One decimal place, e.g. `0.3` or `12.5`.
pub fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}
