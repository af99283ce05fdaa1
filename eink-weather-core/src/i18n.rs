use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Display language. Chosen once at startup and passed to whatever formats text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
}

const WEEKDAYS_EN: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

impl Language {
    /// Code sent to providers that localize descriptions.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
        }
    }

    /// Two-letter weekday abbreviation.
    pub fn weekday(&self, day: Weekday) -> &'static str {
        let names = match self {
            Language::En => &WEEKDAYS_EN,
        };
        names[day.num_days_from_sunday() as usize]
    }

    /// Row label for the hourly precipitation grid.
    pub fn hour_label(&self) -> &'static str {
        match self {
            Language::En => "hour",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[Language::En]
    }
}

impl TryFrom<&str> for Language {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(value))
            .ok_or_else(|| anyhow::anyhow!("Unsupported language '{value}'. Supported languages: en."))
    }
}
