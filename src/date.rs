use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{macros::format_description, Date, Month, OffsetDateTime, PrimitiveDateTime};

/// Earliest year the public constructors accept.  Leaves room for the
/// leading days of a grid and a one-month step inside the range the `time`
/// crate can represent.
///
/// Grid padding and day arithmetic may still produce dates up to a month
/// outside `MIN_YEAR..=MAX_YEAR`; such dates can be selected, but their month
/// cannot be shown.
pub const MIN_YEAR: i32 = -9998;

/// Latest year the public constructors accept; see [`MIN_YEAR`]
pub const MAX_YEAR: i32 = 9998;

/// A civil day (year, month, day) with no time-of-day or offset component.
///
/// Equality and ordering are by (year, month, day) only.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CalendarDate(Date);

impl CalendarDate {
    /// Validates a (year, month, day) tuple, with `month` numbered 1 through
    /// 12.
    pub fn new(year: i32, month: u8, day: u8) -> Result<CalendarDate, DateError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateError::YearOutOfRange(year));
        }
        let Ok(m) = Month::try_from(month) else {
            return Err(DateError::InvalidMonth(month));
        };
        Date::from_calendar_date(year, m, day)
            .map(CalendarDate)
            .map_err(|source| DateError::InvalidDay {
                year,
                month,
                day,
                source,
            })
    }

    // Grid padding may reach one month past the supported range, so cells
    // are built without the year check.
    pub(crate) fn from_date(date: Date) -> CalendarDate {
        CalendarDate(date)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> Month {
        self.0.month()
    }

    pub fn month_number(&self) -> u8 {
        u8::from(self.0.month())
    }

    pub fn day(&self) -> u8 {
        self.0.day()
    }

    /// Returns true if both dates fall in the same (year, month)
    pub fn same_month(&self, other: CalendarDate) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    pub fn as_date(&self) -> Date {
        self.0
    }
}

impl TryFrom<Date> for CalendarDate {
    type Error = DateError;

    fn try_from(date: Date) -> Result<CalendarDate, DateError> {
        if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            Ok(CalendarDate(date))
        } else {
            Err(DateError::YearOutOfRange(date.year()))
        }
    }
}

/// Truncates to the civil day in the timestamp's own offset
impl TryFrom<OffsetDateTime> for CalendarDate {
    type Error = DateError;

    fn try_from(dt: OffsetDateTime) -> Result<CalendarDate, DateError> {
        CalendarDate::try_from(dt.date())
    }
}

impl TryFrom<PrimitiveDateTime> for CalendarDate {
    type Error = DateError;

    fn try_from(dt: PrimitiveDateTime) -> Result<CalendarDate, DateError> {
        CalendarDate::try_from(dt.date())
    }
}

impl From<CalendarDate> for Date {
    fn from(date: CalendarDate) -> Date {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses `YYYY-MM-DD`
impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<CalendarDate, DateError> {
        match Date::parse(s, format_description!("[year]-[month]-[day]")) {
            Ok(date) => CalendarDate::try_from(date),
            Err(source) => Err(DateError::Parse {
                input: s.to_owned(),
                source,
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum DateError {
    #[error("year {0} is outside the supported range {min} through {max}", min = MIN_YEAR, max = MAX_YEAR)]
    YearOutOfRange(i32),
    #[error("invalid month number {0}")]
    InvalidMonth(u8),
    #[error("invalid day {day} for {year}-{month:02}")]
    InvalidDay {
        year: i32,
        month: u8,
        day: u8,
        source: time::error::ComponentRange,
    },
    #[error("invalid date {input:?}; expected YYYY-MM-DD")]
    Parse {
        input: String,
        source: time::error::Parse,
    },
}
