use time::Duration;

use super::CanonicalDate;

/// Length of the trailing window. A fixed day count, not a calendar year, so
/// a span containing Feb 29 ends one calendar day later than "same day last year".
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// Inclusive date predicate; an absent `end` leaves the window open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: CanonicalDate,
    pub end: Option<CanonicalDate>,
}

impl DateWindow {
    pub fn open(start: CanonicalDate) -> Self {
        Self { start, end: None }
    }

    pub fn bounded(start: CanonicalDate, end: CanonicalDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn contains(&self, date: &CanonicalDate) -> bool {
        *date >= self.start && self.end.map_or(true, |end| *date <= end)
    }
}

/// Start of the trailing window ending at `from`.
pub fn trailing_year(from: CanonicalDate) -> CanonicalDate {
    CanonicalDate::new(
        from.date()
            .saturating_sub(Duration::days(TRAILING_WINDOW_DAYS)),
    )
}
