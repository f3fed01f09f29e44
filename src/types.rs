use crate::calendar::DateError;
use crate::consts::{DAYS_IN_LEAP_YEAR, MAX_MONTH, MAX_YEAR, MONTH_NAMES};
use crate::prelude::*;
use crate::RejectionReason;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroU16, NonZeroU8};

/// A Gregorian year in `1..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// # Errors
    /// Returns `DateError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, DateError> {
        match NonZeroU16::new(value) {
            Some(nz) if value <= MAX_YEAR => Ok(Self(nz)),
            _ => Err(DateError::InvalidYear(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.get())
    }
}

/// A calendar month in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        match NonZeroU8::new(value) {
            Some(nz) if value <= MAX_MONTH => Ok(Self(nz)),
            _ => Err(DateError::InvalidMonth(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// English name of the month, e.g. "August"
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self.0.get() as usize]
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

/// A 1-based ordinal day within a year, at most `DAYS_IN_LEAP_YEAR`.
///
/// Whether day 366 exists is a property of the year, so that check is left to
/// [`CalendarDate::from_ordinal`](crate::CalendarDate::from_ordinal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct DayOfYear(NonZeroU16);

impl DayOfYear {
    /// # Errors
    /// Returns `RejectionReason::InvalidDayOfYear` if the value is 0 or > 366.
    pub fn new(value: u16) -> Result<Self, RejectionReason> {
        match NonZeroU16::new(value) {
            Some(nz) if value <= DAYS_IN_LEAP_YEAR => Ok(Self(nz)),
            _ => Err(RejectionReason::InvalidDayOfYear(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for DayOfYear {
    type Error = RejectionReason;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayOfYear> for u16 {
    fn from(day: DayOfYear) -> Self {
        day.get()
    }
}

impl fmt::Display for DayOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sex of the card holder as encoded in the day field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Sex {
    #[display(fmt = "Male")]
    Male,
    #[display(fmt = "Female")]
    Female,
}
