//! Access-flow timeframe primitives: weekdays and times of day.

use once_cell::sync::Lazy;
use regex::Regex;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::ProviderError;

static TIME_OF_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9])$").expect("valid time regex")
});

const SECONDS_PER_DAY: i32 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn parse(value: &str) -> Result<Self, ProviderError> {
        value.parse().map_err(|_| {
            ProviderError::invalid_value(
                "days_in_week",
                format!("'{value}' is not a day of the week"),
            )
        })
    }
}

/// Parse `HH:MM:SS` into seconds since midnight.
pub fn parse_time_of_day(attribute: &str, value: &str) -> Result<i32, ProviderError> {
    let caps = TIME_OF_DAY.captures(value).ok_or_else(|| {
        ProviderError::invalid_value(attribute, format!("'{value}' is not in HH:MM:SS format"))
    })?;

    let mut seconds = 0;
    for (idx, factor) in [(1, 3600), (2, 60), (3, 1)] {
        let part: i32 = caps[idx]
            .parse()
            .map_err(|_| ProviderError::invalid_value(attribute, format!("'{value}' is not a time")))?;
        seconds += part * factor;
    }
    Ok(seconds)
}

/// Render seconds since midnight as `HH:MM:SS`.
pub fn format_time_of_day(seconds: i32) -> Result<String, ProviderError> {
    if !(0..SECONDS_PER_DAY).contains(&seconds) {
        return Err(ProviderError::invalid_value(
            "timeframe",
            format!("{seconds} is not a second of the day"),
        ));
    }
    Ok(format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    ))
}
