/// Length of an old-format NIC: nine digits and a trailing letter
pub const OLD_FORMAT_LEN: usize = 10;
/// Length of a new-format NIC: twelve digits
pub const NEW_FORMAT_LEN: usize = 12;

/// Letters accepted in the last position of an old-format NIC
pub const OLD_FORMAT_LETTERS: [char; 2] = ['V', 'X'];

/// Byte range of the year digits in an old-format NIC
pub const OLD_YEAR_DIGITS: std::ops::Range<usize> = 0..2;
/// Byte range of the day digits in an old-format NIC
pub const OLD_DAY_DIGITS: std::ops::Range<usize> = 2..5;
/// Byte range of the year digits in a new-format NIC
pub const NEW_YEAR_DIGITS: std::ops::Range<usize> = 0..4;
/// Byte range of the day digits in a new-format NIC
pub const NEW_DAY_DIGITS: std::ops::Range<usize> = 4..7;

/// Two-digit years below this pivot belong to the 2000s, the rest to the 1900s
pub const CENTURY_PIVOT: u16 = 50;
/// Base added to two-digit years below `CENTURY_PIVOT`
pub const CURRENT_CENTURY: u16 = 2000;
/// Base added to two-digit years at or above `CENTURY_PIVOT`
pub const PREVIOUS_CENTURY: u16 = 1900;

/// Day fields above this value encode a female holder
pub const FEMALE_DAY_OFFSET: u16 = 500;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days in a common year
pub const DAYS_IN_COMMON_YEAR: u16 = 365;
/// Days in a leap year, also the largest day-of-year value
pub const DAYS_IN_LEAP_YEAR: u16 = 366;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// English month names, 1-indexed like `DAYS_IN_MONTH`
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
pub(crate) const CENTURY_CYCLE: u16 = 100;
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
