use crate::format::{self, NicFormat};
use crate::{CENTURY_PIVOT, CalendarDate, DecodedNic, FEMALE_DAY_OFFSET, RejectionReason, Sex};
use std::fmt;

/// Field-by-field account of how a NIC was decoded, for showing to the holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    normalized: String,
    year_digits: String,
    day_digits: String,
    raw_day: u16,
    decoded: DecodedNic,
}

impl Explanation {
    /// Decodes `raw` and keeps the digit groups that produced each field.
    ///
    /// # Errors
    /// Same rejections as [`decode`](crate::decode).
    pub fn of(raw: &str, reference_now: &CalendarDate) -> Result<Self, RejectionReason> {
        let decoded = crate::decode(raw, reference_now)?;
        let normalized = format::normalize(raw);
        let (year_digits, day_digits) = format::digit_groups(&normalized, decoded.source_format())
            .ok_or_else(|| RejectionReason::Internal("digit groups missing".to_owned()))?;
        let raw_day = format::extract(&normalized, decoded.source_format())?.day;

        Ok(Self {
            year_digits: year_digits.to_owned(),
            day_digits: day_digits.to_owned(),
            normalized,
            raw_day,
            decoded,
        })
    }

    pub const fn decoded(&self) -> &DecodedNic {
        &self.decoded
    }

    /// The NIC as decoded: trimmed and uppercased
    pub fn nic(&self) -> &str {
        &self.normalized
    }

    /// Digits the birth year was read from
    pub fn year_digits(&self) -> &str {
        &self.year_digits
    }

    /// Digits the day and sex were read from
    pub fn day_digits(&self) -> &str {
        &self.day_digits
    }

    /// Day field before the sex offset is removed
    pub const fn raw_day(&self) -> u16 {
        self.raw_day
    }

    pub const fn offset_applied(&self) -> bool {
        self.raw_day > FEMALE_DAY_OFFSET
    }

    fn year_line(&self) -> String {
        let year = self.decoded.birth_year();
        match self.decoded.source_format() {
            NicFormat::Old => {
                let century = if year % 100 < CENTURY_PIVOT {
                    "below"
                } else {
                    "at or above"
                };
                format!(
                    "The first two digits ({}) represent the year {year} ({century} {CENTURY_PIVOT}).",
                    self.year_digits
                )
            }
            NicFormat::New => format!(
                "The first four digits ({}) directly represent the birth year.",
                self.year_digits
            ),
        }
    }

    fn sex_line(&self) -> String {
        match self.decoded.sex() {
            Sex::Female => format!(
                "{} > {FEMALE_DAY_OFFSET}, therefore Female; the actual day is {}.",
                self.day_digits,
                self.decoded.day_of_year()
            ),
            Sex::Male => format!("{} <= {FEMALE_DAY_OFFSET}, therefore Male.", self.day_digits),
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nic = &self.decoded;
        writeln!(f, "NIC {} uses the {} format.", self.normalized, nic.source_format())?;
        writeln!(f, "{}", self.year_line())?;
        writeln!(
            f,
            "The next three digits ({}) give day {} of the year: {}.",
            self.day_digits,
            nic.day_of_year(),
            nic.birth_date().month_day_format()
        )?;
        writeln!(f, "{}", self.sex_line())?;
        writeln!(f, "Birth date: {}", nic.birth_date().long_format())?;
        writeln!(f, "Sex: {}", nic.sex())?;
        write!(f, "Age: {} years", nic.age())
    }
}
