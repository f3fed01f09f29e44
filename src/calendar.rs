//! Gregorian calendar helpers and the concrete date type produced by decoding.

use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, DAYS_IN_MONTH,
    FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH,
};
use crate::types::{DayOfYear, Month, Year};
use crate::RejectionReason;
use std::fmt;
use std::str::FromStr;

/// Error building or parsing a [`CalendarDate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
    #[error("Invalid year: {0} (must be 1-9999)")]
    InvalidYear(u16),
    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u8),
    #[error("Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[error("Empty date string")]
    EmptyInput,
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Length of `month` in `year`. Taking a `Month` keeps the table lookup in bounds.
pub const fn days_in_month(year: u16, month: Month) -> u8 {
    let m = month.get();
    if m == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[m as usize]
    }
}

pub const fn days_in_year(year: u16) -> u16 {
    if is_leap_year(year) {
        DAYS_IN_LEAP_YEAR
    } else {
        DAYS_IN_COMMON_YEAR
    }
}

/// A fully specified Gregorian date.
///
/// Ordering is chronological. Serializes as an ISO 8601 `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: u8,
}

impl CalendarDate {
    /// # Errors
    /// Returns a `DateError` if any component is out of range for the calendar.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year_typed = Year::new(year)?;
        let month_typed = Month::new(month)?;
        if day == 0 || day > days_in_month(year, month_typed) {
            return Err(DateError::InvalidDay { year, month, day });
        }
        Ok(Self {
            year: year_typed,
            month: month_typed,
            day,
        })
    }

    /// Maps an ordinal day to its month and day by walking the month table
    /// for the year's leap status.
    ///
    /// # Errors
    /// Returns `RejectionReason::InvalidDayOfYear` for day 366 of a common year.
    pub fn from_ordinal(year: Year, day_of_year: DayOfYear) -> Result<Self, RejectionReason> {
        let y = year.get();
        let ordinal = day_of_year.get();
        if ordinal > days_in_year(y) {
            return Err(RejectionReason::InvalidDayOfYear(ordinal));
        }

        let mut remaining = ordinal;
        for m in 1..=MAX_MONTH {
            let month = Month::new(m).map_err(|e| RejectionReason::Internal(e.to_string()))?;
            let len = u16::from(days_in_month(y, month));
            if remaining <= len {
                let day = u8::try_from(remaining)
                    .map_err(|e| RejectionReason::Internal(e.to_string()))?;
                return Ok(Self { year, month, day });
            }
            remaining -= len;
        }

        Err(RejectionReason::Internal(format!(
            "ordinal {ordinal} fell past December in {y}"
        )))
    }

    /// 1-based position of this date within its year.
    pub fn ordinal(&self) -> u16 {
        let y = self.year.get();
        let preceding: u16 = (1..self.month.get())
            .filter_map(|m| Month::new(m).ok())
            .map(|m| u16::from(days_in_month(y, m)))
            .sum();
        preceding + u16::from(self.day)
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Long-form en-US rendering, e.g. `August 15, 1991`.
    pub fn long_format(&self) -> String {
        format!("{} {}, {}", self.month.name(), self.day, self.year.get())
    }

    /// Month name and day without the year, e.g. `June 12`.
    pub fn month_day_format(&self) -> String {
        format!("{} {}", self.month.name(), self.day)
    }
}

/// Whole years elapsed from `birth` to `reference_now`.
///
/// The count only increments on the anniversary itself. A birth date after
/// `reference_now` yields a negative age.
pub fn age_at(birth: &CalendarDate, reference_now: &CalendarDate) -> i32 {
    let mut age = i32::from(reference_now.year()) - i32::from(birth.year());
    if (reference_now.month(), reference_now.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, got {trimmed}"
            )));
        };

        let year = year
            .parse::<u16>()
            .map_err(|_| DateError::InvalidFormat((*year).to_owned()))?;
        let month = month
            .parse::<u8>()
            .map_err(|_| DateError::InvalidFormat((*month).to_owned()))?;
        let day = day
            .parse::<u8>()
            .map_err(|_| DateError::InvalidFormat((*day).to_owned()))?;

        Self::new(year, month, day)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
