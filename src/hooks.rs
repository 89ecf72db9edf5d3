//! The selection policy and annotations configured on the command line
use crate::moon::Phase;
use monthpick::{CalendarDate, CalendarRules, DotSet, DotSource, Gregorian, SelectionPolicy};
use std::convert::Infallible;
use time::Weekday;

/// Vetoes dates outside an optional range and, optionally, weekends
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DateBounds {
    pub(crate) min: Option<CalendarDate>,
    pub(crate) max: Option<CalendarDate>,
    pub(crate) no_weekends: bool,
}

impl SelectionPolicy for DateBounds {
    type Error = Infallible;

    fn can_select_date(&self, date: CalendarDate) -> Result<bool, Infallible> {
        if self.min.is_some_and(|min| date < min) || self.max.is_some_and(|max| date > max) {
            return Ok(false);
        }
        let weekend = matches!(Gregorian.weekday(date), Weekday::Saturday | Weekday::Sunday);
        Ok(!(self.no_weekends && weekend))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Annotations {
    pub(crate) dates: DotSet,
    /// Also mark the new and full moons as `NetHack` computes them
    pub(crate) moon: bool,
}

impl DotSource for Annotations {
    fn show_dot_for_date(&self, date: CalendarDate) -> bool {
        self.dates.contains(date) || (self.moon && Phase::for_date(date).is_notable())
    }
}
