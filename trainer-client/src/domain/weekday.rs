//! Weekday codes and the compact weekday-set token used on the wire.
//!
//! Monday..Saturday are the single digits `2`..`7` and Sunday is the
//! two-character token `CN`. A set always serializes in the fixed order
//! `2,3,4,5,6,7,CN`, so `"642"` and `"2466"` both normalize to `"246"`.

use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;

/// Token for Sunday; every other day is a single digit
const SUNDAY_TOKEN: &str = "CN";

/// A single day of the week in the gym's numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeekdayCode {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekdayCode {
    /// All codes in canonical serialization order
    pub const ALL: [WeekdayCode; 7] = [
        WeekdayCode::Monday,
        WeekdayCode::Tuesday,
        WeekdayCode::Wednesday,
        WeekdayCode::Thursday,
        WeekdayCode::Friday,
        WeekdayCode::Saturday,
        WeekdayCode::Sunday,
    ];

    /// Wire code: "2".."7" for Monday..Saturday, "CN" for Sunday
    pub const fn code(self) -> &'static str {
        match self {
            WeekdayCode::Monday => "2",
            WeekdayCode::Tuesday => "3",
            WeekdayCode::Wednesday => "4",
            WeekdayCode::Thursday => "5",
            WeekdayCode::Friday => "6",
            WeekdayCode::Saturday => "7",
            WeekdayCode::Sunday => SUNDAY_TOKEN,
        }
    }

    /// Label shown to trainers
    pub const fn label(self) -> &'static str {
        match self {
            WeekdayCode::Monday => "Thứ 2",
            WeekdayCode::Tuesday => "Thứ 3",
            WeekdayCode::Wednesday => "Thứ 4",
            WeekdayCode::Thursday => "Thứ 5",
            WeekdayCode::Friday => "Thứ 6",
            WeekdayCode::Saturday => "Thứ 7",
            WeekdayCode::Sunday => "Chủ nhật",
        }
    }

    /// Map a single-digit code to its weekday
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '2' => Some(WeekdayCode::Monday),
            '3' => Some(WeekdayCode::Tuesday),
            '4' => Some(WeekdayCode::Wednesday),
            '5' => Some(WeekdayCode::Thursday),
            '6' => Some(WeekdayCode::Friday),
            '7' => Some(WeekdayCode::Saturday),
            _ => None,
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => WeekdayCode::Monday,
            Weekday::Tue => WeekdayCode::Tuesday,
            Weekday::Wed => WeekdayCode::Wednesday,
            Weekday::Thu => WeekdayCode::Thursday,
            Weekday::Fri => WeekdayCode::Friday,
            Weekday::Sat => WeekdayCode::Saturday,
            Weekday::Sun => WeekdayCode::Sunday,
        }
    }

    /// Weekday code of a calendar date
    pub fn of(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for WeekdayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An unordered, duplicate-free set of weekday codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const fn empty() -> Self {
        WeekdaySet(0)
    }

    pub const fn single(code: WeekdayCode) -> Self {
        WeekdaySet(code.bit())
    }

    /// Add a code; returns false when it was already present
    pub fn insert(&mut self, code: WeekdayCode) -> bool {
        let present = self.contains(code);
        self.0 |= code.bit();
        !present
    }

    pub fn remove(&mut self, code: WeekdayCode) {
        self.0 &= !code.bit();
    }

    pub const fn contains(self, code: WeekdayCode) -> bool {
        self.0 & code.bit() != 0
    }

    pub const fn intersects(self, other: WeekdaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn intersection(self, other: WeekdaySet) -> WeekdaySet {
        WeekdaySet(self.0 & other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Codes in canonical order
    pub fn iter(self) -> impl Iterator<Item = WeekdayCode> {
        WeekdayCode::ALL
            .into_iter()
            .filter(move |code| self.contains(*code))
    }

    /// Concatenate the codes in canonical order, e.g. `{Mon, Sun}` -> `"2CN"`
    pub fn encode(self) -> String {
        self.iter().map(WeekdayCode::code).collect()
    }

    /// Parse a weekday token.
    ///
    /// Scans left to right: `CN` is consumed as Sunday, a digit in `2..=7` as
    /// the matching weekday, and any other character is skipped so malformed
    /// legacy tokens still yield their recognizable days. Repeated codes count
    /// once.
    pub fn decode(token: &str) -> Self {
        let mut set = WeekdaySet::empty();
        let mut chars = token.chars().peekable();

        while let Some(c) = chars.next() {
            if c == 'C' && chars.peek() == Some(&'N') {
                chars.next();
                set.insert(WeekdayCode::Sunday);
            } else if let Some(code) = WeekdayCode::from_digit(c) {
                set.insert(code);
            }
        }

        set
    }

    /// Like [`WeekdaySet::decode`], with a missing token decoding to the empty set
    pub fn decode_opt(token: Option<&str>) -> Self {
        token.map(Self::decode).unwrap_or_default()
    }

    /// Human-readable list such as "Thứ 2, Thứ 4, Chủ nhật"
    pub fn labels(self) -> String {
        self.iter()
            .map(WeekdayCode::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<WeekdayCode> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = WeekdayCode>>(iter: I) -> Self {
        let mut set = WeekdaySet::empty();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
