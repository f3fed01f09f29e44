//! Shape detection and field extraction for raw NIC strings.

use crate::consts::{
    NEW_DAY_DIGITS, NEW_FORMAT_LEN, NEW_YEAR_DIGITS, OLD_DAY_DIGITS, OLD_FORMAT_LEN,
    OLD_FORMAT_LETTERS, OLD_YEAR_DIGITS,
};
use crate::prelude::*;
use crate::RejectionReason;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Which of the two NIC layouts an identifier uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NicFormat {
    /// Nine digits and a trailing `V` or `X`, two-digit year
    #[display(fmt = "old (9 digits + V/X)")]
    Old,
    /// Twelve digits, four-digit year
    #[display(fmt = "new (12 digits)")]
    New,
}

impl NicFormat {
    const fn year_digits(self) -> Range<usize> {
        match self {
            Self::Old => OLD_YEAR_DIGITS,
            Self::New => NEW_YEAR_DIGITS,
        }
    }

    const fn day_digits(self) -> Range<usize> {
        match self {
            Self::Old => OLD_DAY_DIGITS,
            Self::New => NEW_DAY_DIGITS,
        }
    }
}

/// The still-encoded numeric fields of a NIC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields {
    /// Two digits for `Old`, four for `New`
    pub year: u16,
    /// Day of year, plus 500 for female holders
    pub day: u16,
}

/// Trims surrounding whitespace and uppercases ASCII letters.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Detects the layout of `raw`. Matching is exact: no partial or lenient forms.
///
/// # Errors
/// Returns `RejectionReason::InvalidFormat` when neither layout matches.
pub fn classify(raw: &str) -> Result<NicFormat, RejectionReason> {
    classify_normalized(&normalize(raw))
}

pub(crate) fn classify_normalized(normalized: &str) -> Result<NicFormat, RejectionReason> {
    let bytes = normalized.as_bytes();
    match bytes.len() {
        OLD_FORMAT_LEN => {
            let (digits, letter) = bytes.split_at(OLD_FORMAT_LEN - 1);
            let letter_ok =
                matches!(letter, [l] if OLD_FORMAT_LETTERS.contains(&char::from(*l)));
            if letter_ok && digits.iter().all(u8::is_ascii_digit) {
                return Ok(NicFormat::Old);
            }
        }
        NEW_FORMAT_LEN => {
            if bytes.iter().all(u8::is_ascii_digit) {
                return Ok(NicFormat::New);
            }
        }
        _ => {}
    }
    Err(RejectionReason::InvalidFormat(format!(
        "{} characters do not match either NIC layout",
        normalized.chars().count()
    )))
}

/// Pulls the year and day digit groups out of an already classified NIC.
///
/// # Errors
/// Returns `RejectionReason::Internal` if a digit group is missing or not
/// numeric, which `classify` rules out for well-formed callers.
pub fn extract(normalized: &str, format: NicFormat) -> Result<RawFields, RejectionReason> {
    Ok(RawFields {
        year: parse_digits(normalized, format.year_digits())?,
        day: parse_digits(normalized, format.day_digits())?,
    })
}

/// The digit groups as they appear in the NIC, for display.
pub(crate) fn digit_groups(normalized: &str, format: NicFormat) -> Option<(&str, &str)> {
    Some((
        normalized.get(format.year_digits())?,
        normalized.get(format.day_digits())?,
    ))
}

fn parse_digits(normalized: &str, range: Range<usize>) -> Result<u16, RejectionReason> {
    let group = normalized.get(range.clone()).ok_or_else(|| {
        RejectionReason::Internal(format!(
            "field {range:?} out of bounds for a {} byte NIC",
            normalized.len()
        ))
    })?;
    if !group.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RejectionReason::Internal(format!(
            "field {range:?} is not all digits"
        )));
    }
    group
        .parse::<u16>()
        .map_err(|e| RejectionReason::Internal(format!("field {range:?}: {e}")))
}
