//! Decoding and validation of Sri Lankan National Identity Card (NIC) numbers.
//!
//! A NIC encodes the holder's birth year, the day of that year, and their sex.
//! [`decode`] checks that a raw string has one of the two NIC layouts, pulls
//! those fields out, and rebuilds a calendar birth date and an age relative to
//! a caller-supplied reference date.
//!
//! ```
//! use sl_nic::{CalendarDate, NicFormat, Sex, decode};
//!
//! let today: CalendarDate = "2026-10-19".parse().unwrap();
//! let nic = decode("996663272V", &today).unwrap();
//! assert_eq!(nic.source_format(), NicFormat::Old);
//! assert_eq!(nic.sex(), Sex::Female);
//! assert_eq!(nic.birth_date().to_string(), "1999-06-15");
//! assert_eq!(nic.age(), 27);
//! ```

pub mod calendar;
mod consts;
mod explain;
pub mod format;
mod prelude;
mod types;

pub use calendar::{CalendarDate, DateError, age_at, days_in_month, days_in_year, is_leap_year};
pub use consts::*;
pub use explain::Explanation;
pub use format::{NicFormat, RawFields, classify, extract, normalize};
pub use types::{DayOfYear, Month, Sex, Year};

use serde::Serialize;

/// Why a string could not be decoded as a NIC.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    /// The input is neither nine digits plus `V`/`X` nor twelve digits.
    #[error("Please enter a valid NIC number (12 digits or 9 digits + V/X): {0}")]
    InvalidFormat(String),

    /// The day field, after removing the sex offset, is 0, above 366, or 366
    /// in a common year.
    #[error("Invalid day of year in NIC: {0}")]
    InvalidDayOfYear(u16),

    /// A new-format year of `0000`.
    #[error("Invalid birth year in NIC: {0:04}")]
    InvalidYear(u16),

    /// A bug in this crate rather than bad input.
    #[error("Internal NIC decoder error: {0}")]
    Internal(String),
}

impl RejectionReason {
    /// `false` only for [`RejectionReason::Internal`]; every other variant is
    /// a property of the input.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

impl From<DateError> for RejectionReason {
    fn from(err: DateError) -> Self {
        match err {
            DateError::InvalidYear(year) => Self::InvalidYear(year),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// The fields recovered from a valid NIC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DecodedNic {
    birth_year: Year,
    day_of_year: DayOfYear,
    sex: Sex,
    birth_date: CalendarDate,
    age: i32,
    source_format: NicFormat,
}

impl DecodedNic {
    pub const fn birth_year(&self) -> u16 {
        self.birth_year.get()
    }

    /// Day of the birth year with the sex offset already removed
    pub const fn day_of_year(&self) -> u16 {
        self.day_of_year.get()
    }

    pub const fn sex(&self) -> Sex {
        self.sex
    }

    pub const fn birth_date(&self) -> CalendarDate {
        self.birth_date
    }

    /// Whole years at the reference date passed to [`decode`]. Negative when
    /// the birth date lies after it.
    pub const fn age(&self) -> i32 {
        self.age
    }

    pub const fn source_format(&self) -> NicFormat {
        self.source_format
    }
}

/// Turns the raw year digits into a full Gregorian year.
///
/// Old-format years below `CENTURY_PIVOT` land in the 2000s, the rest in the
/// 1900s. New-format years are taken literally.
///
/// # Errors
/// Returns `RejectionReason::InvalidYear` for a year of 0.
pub fn resolve_year(raw_year: u16, format: NicFormat) -> Result<Year, RejectionReason> {
    let year = match format {
        NicFormat::Old if raw_year < CENTURY_PIVOT => CURRENT_CENTURY + raw_year,
        NicFormat::Old => PREVIOUS_CENTURY + raw_year,
        NicFormat::New => raw_year,
    };
    Year::new(year).map_err(RejectionReason::from)
}

/// Splits the encoded day field into the day of year and the holder's sex.
///
/// # Errors
/// Returns `RejectionReason::InvalidDayOfYear` if the resulting day is 0 or
/// above 366.
pub fn resolve_day_and_sex(raw_day: u16) -> Result<(DayOfYear, Sex), RejectionReason> {
    let (day, sex) = if raw_day > FEMALE_DAY_OFFSET {
        (raw_day - FEMALE_DAY_OFFSET, Sex::Female)
    } else {
        (raw_day, Sex::Male)
    };
    Ok((DayOfYear::new(day)?, sex))
}

/// Decodes `raw` as a NIC, computing the age at `reference_now`.
///
/// Surrounding whitespace and letter case in `raw` are ignored. The first
/// failing step decides the rejection.
///
/// # Errors
/// See [`RejectionReason`].
pub fn decode(raw: &str, reference_now: &CalendarDate) -> Result<DecodedNic, RejectionReason> {
    let result = decode_inner(raw, reference_now);
    match &result {
        Ok(nic) => tracing::trace!(format = ?nic.source_format, "decoded NIC"),
        Err(reason) if reason.is_recoverable() => {
            tracing::debug!(len = raw.len(), %reason, "rejected NIC");
        }
        Err(reason) => tracing::error!(len = raw.len(), %reason, "NIC decoder invariant broken"),
    }
    result
}

fn decode_inner(raw: &str, reference_now: &CalendarDate) -> Result<DecodedNic, RejectionReason> {
    let normalized = normalize(raw);
    let source_format = format::classify_normalized(&normalized)?;
    let fields = extract(&normalized, source_format)?;
    let birth_year = resolve_year(fields.year, source_format)?;
    let (day_of_year, sex) = resolve_day_and_sex(fields.day)?;
    let birth_date = CalendarDate::from_ordinal(birth_year, day_of_year)?;
    let age = age_at(&birth_date, reference_now);

    Ok(DecodedNic {
        birth_year,
        day_of_year,
        sex,
        birth_date,
        age,
        source_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> CalendarDate {
        CalendarDate::new(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_decode_new_format() {
        let nic = decode("197419202757", &today()).unwrap();
        assert_eq!(nic.source_format(), NicFormat::New);
        assert_eq!(nic.birth_year(), 1974);
        assert_eq!(nic.day_of_year(), 192);
        assert_eq!(nic.sex(), Sex::Male);
        assert_eq!(nic.birth_date(), CalendarDate::new(1974, 7, 11).unwrap());
        assert_eq!(nic.age(), 52);
    }

    #[test]
    fn test_decode_old_format_female() {
        let nic = decode("996663272V", &today()).unwrap();
        assert_eq!(nic.source_format(), NicFormat::Old);
        assert_eq!(nic.birth_year(), 1999);
        assert_eq!(nic.day_of_year(), 166);
        assert_eq!(nic.sex(), Sex::Female);
        assert_eq!(nic.birth_date(), CalendarDate::new(1999, 6, 15).unwrap());
        assert_eq!(nic.age(), 27);

        // day field 663 is day 163
        let nic = decode("996633272V", &today()).unwrap();
        assert_eq!(nic.day_of_year(), 163);
        assert_eq!(nic.sex(), Sex::Female);
        assert_eq!(nic.birth_date(), CalendarDate::new(1999, 6, 12).unwrap());
    }

    #[test]
    fn test_decode_lowercase_and_padded() {
        let upper = decode("996663272X", &today()).unwrap();
        assert_eq!(decode("996663272x", &today()).unwrap(), upper);
        assert_eq!(decode("  996663272x  ", &today()).unwrap(), upper);
    }

    #[test]
    fn test_decode_rejections() {
        assert!(matches!(
            decode("12345", &today()),
            Err(RejectionReason::InvalidFormat(_))
        ));
        assert!(matches!(
            decode("", &today()),
            Err(RejectionReason::InvalidFormat(_))
        ));
        assert!(matches!(
            decode("000000000V", &today()),
            Err(RejectionReason::InvalidDayOfYear(0))
        ));
        assert!(matches!(
            decode("199900366X", &today()),
            Err(RejectionReason::InvalidDayOfYear(490))
        ));
        assert!(matches!(
            decode("000012345678", &today()),
            Err(RejectionReason::InvalidYear(0))
        ));
    }

    #[test]
    fn test_old_format_century_pivot() {
        struct TestCase {
            nic: &'static str,
            year: u16,
        }

        let cases = [
            TestCase {
                nic: "000010000V",
                year: 2000,
            },
            TestCase {
                nic: "490010000V",
                year: 2049,
            },
            TestCase {
                nic: "500010000V",
                year: 1950,
            },
            TestCase {
                nic: "990010000V",
                year: 1999,
            },
        ];

        for case in &cases {
            let nic = decode(case.nic, &today()).unwrap();
            assert_eq!(nic.birth_year(), case.year, "{}", case.nic);
        }
    }

    #[test]
    fn test_new_format_year_is_literal() {
        for (nic, year) in [("004910000000", 49), ("195010000000", 1950), ("210010000000", 2100)] {
            assert_eq!(decode(nic, &today()).unwrap().birth_year(), year, "{nic}");
        }
    }

    #[test]
    fn test_sex_offset_boundaries() {
        assert!(matches!(
            resolve_day_and_sex(500),
            Err(RejectionReason::InvalidDayOfYear(500))
        ));
        assert_eq!(
            resolve_day_and_sex(501).unwrap(),
            (DayOfYear::new(1).unwrap(), Sex::Female)
        );
        assert_eq!(
            resolve_day_and_sex(866).unwrap(),
            (DayOfYear::new(366).unwrap(), Sex::Female)
        );
        assert!(matches!(
            resolve_day_and_sex(867),
            Err(RejectionReason::InvalidDayOfYear(367))
        ));
        assert_eq!(
            resolve_day_and_sex(366).unwrap(),
            (DayOfYear::new(366).unwrap(), Sex::Male)
        );
        assert!(matches!(
            resolve_day_and_sex(367),
            Err(RejectionReason::InvalidDayOfYear(367))
        ));
        assert!(matches!(
            resolve_day_and_sex(900),
            Err(RejectionReason::InvalidDayOfYear(400))
        ));
    }

    #[test]
    fn test_day_366_only_in_leap_years() {
        // 1996 is leap, 1999 is not
        let nic = decode("963660000V", &today()).unwrap();
        assert_eq!(nic.birth_date(), CalendarDate::new(1996, 12, 31).unwrap());
        let nic = decode("968660000V", &today()).unwrap();
        assert_eq!(nic.sex(), Sex::Female);
        assert_eq!(nic.birth_date(), CalendarDate::new(1996, 12, 31).unwrap());

        assert!(matches!(
            decode("993660000V", &today()),
            Err(RejectionReason::InvalidDayOfYear(366))
        ));
        assert!(matches!(
            decode("190036600000", &today()),
            Err(RejectionReason::InvalidDayOfYear(366))
        ));
        assert!(decode("200036600000", &today()).is_ok());
    }

    #[test]
    fn test_age_increments_on_anniversary() {
        // 1990, day 166 is June 15
        let before = CalendarDate::new(2020, 6, 14).unwrap();
        let on = CalendarDate::new(2020, 6, 15).unwrap();
        assert_eq!(decode("199016600000", &before).unwrap().age(), 29);
        assert_eq!(decode("199016600000", &on).unwrap().age(), 30);
    }

    #[test]
    fn test_future_birth_date_gives_negative_age() {
        let nic = decode("493650000V", &today()).unwrap();
        assert_eq!(nic.birth_date(), CalendarDate::new(2049, 12, 31).unwrap());
        assert_eq!(nic.age(), -24);
    }

    #[test]
    fn test_round_trip_fields() {
        for year in [1950_u16, 1996, 1999, 2000, 2023, 2024] {
            for day in 1..=days_in_year(year) {
                for sex in [Sex::Male, Sex::Female] {
                    let field = match sex {
                        Sex::Male => day,
                        Sex::Female => day + FEMALE_DAY_OFFSET,
                    };
                    let raw = format!("{year:04}{field:03}00000");
                    let nic = decode(&raw, &today()).unwrap();
                    assert_eq!(
                        (nic.birth_year(), nic.day_of_year(), nic.sex()),
                        (year, day, sex),
                        "{raw}"
                    );
                    assert_eq!(nic.birth_date().ordinal(), day);
                }
            }
        }
    }

    #[test]
    fn test_decode_is_idempotent() {
        for raw in ["996663272V", "197419202757", "000000000V", "12345"] {
            assert_eq!(decode(raw, &today()), decode(raw, &today()));
        }
    }

    #[test]
    fn test_rejection_recoverability() {
        assert!(RejectionReason::InvalidFormat(String::new()).is_recoverable());
        assert!(RejectionReason::InvalidDayOfYear(0).is_recoverable());
        assert!(RejectionReason::InvalidYear(0).is_recoverable());
        assert!(!RejectionReason::Internal(String::new()).is_recoverable());
    }

    #[test]
    fn test_decoded_serializes() {
        let nic = decode("996663272V", &today()).unwrap();
        let json = serde_json::to_value(nic).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "birth_year": 1999,
                "day_of_year": 166,
                "sex": "Female",
                "birth_date": "1999-06-15",
                "age": 27,
                "source_format": "old",
            })
        );
    }
}
