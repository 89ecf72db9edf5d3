use crate::date::CalendarDate;
use time::{Date, Duration, Month, Weekday};

/// The calendar arithmetic the grid and the month pager depend on.
///
/// Nothing in this crate consults an ambient calendar or time zone; all
/// weekday assignment and date stepping goes through an implementation of
/// this trait.
pub trait CalendarRules {
    fn weekday(&self, date: CalendarDate) -> Weekday;

    /// Returns `None` if the result cannot be represented
    fn add_days(&self, date: CalendarDate, days: i64) -> Option<CalendarDate>;

    /// Moves `date` by a number of calendar months, keeping the day of the
    /// month when the target month has it and otherwise clamping to the
    /// target month's last day.  Returns `None` if the result cannot be
    /// represented.
    fn add_months(&self, date: CalendarDate, months: i32) -> Option<CalendarDate>;
}

/// The proleptic Gregorian calendar
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Gregorian;

impl CalendarRules for Gregorian {
    fn weekday(&self, date: CalendarDate) -> Weekday {
        date.as_date().weekday()
    }

    fn add_days(&self, date: CalendarDate, days: i64) -> Option<CalendarDate> {
        date.as_date()
            .checked_add(Duration::days(days))
            .map(CalendarDate::from_date)
    }

    fn add_months(&self, date: CalendarDate, months: i32) -> Option<CalendarDate> {
        let month0 = i64::from(date.year()) * 12
            + i64::from(date.month_number() - 1)
            + i64::from(months);
        let year = i32::try_from(month0.div_euclid(12)).ok()?;
        let month = u8::try_from(month0.rem_euclid(12) + 1).ok()?;
        let month = Month::try_from(month).ok()?;
        // Walk down from the requested day until the target month has it
        (1..=date.day())
            .rev()
            .find_map(|day| Date::from_calendar_date(year, month, day).ok())
            .map(CalendarDate::from_date)
    }
}
