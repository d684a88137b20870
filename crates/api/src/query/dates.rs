use serde::{Serialize, Serializer};
use std::fmt;
use time::{macros::format_description, Date, Month};

/// Length of an external `MMDDYYYY` date token.
const TOKEN_LEN: usize = 8;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("'{token}' is not a valid MMDDYYYY calendar date")]
pub struct InvalidFormat {
    pub token: String,
}

/// A validated calendar date, rendered as `YYYY-MM-DD`.
///
/// Only produced by [`normalize`] from a caller token, or by [`CanonicalDate::from_iso`]
/// when decoding dates already stored in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate(Date);

impl CanonicalDate {
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// Parse the store's ISO `YYYY-MM-DD` text representation.
    pub fn from_iso(value: &str) -> Result<Self, time::error::Parse> {
        Date::parse(value, format_description!("[year]-[month]-[day]")).map(Self)
    }

    pub fn date(&self) -> Date {
        self.0
    }

    /// Long English form, e.g. `August 23, 2017`.
    pub fn long_form(&self) -> String {
        format!("{} {}, {}", self.0.month(), self.0.day(), self.0.year())
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Turn an external `MMDDYYYY` token into a [`CanonicalDate`].
///
/// Checks calendar validity only (days per month, leap years); whether the
/// date exists in the dataset is the bounds resolver's concern.
pub fn normalize(token: &str) -> Result<CanonicalDate, InvalidFormat> {
    let invalid = || InvalidFormat {
        token: token.to_owned(),
    };

    if token.len() != TOKEN_LEN || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let month: u8 = token[0..2].parse().map_err(|_| invalid())?;
    let day: u8 = token[2..4].parse().map_err(|_| invalid())?;
    let year: i32 = token[4..8].parse().map_err(|_| invalid())?;

    let month = Month::try_from(month).map_err(|_| invalid())?;
    Date::from_calendar_date(year, month, day)
        .map(CanonicalDate)
        .map_err(|_| invalid())
}
