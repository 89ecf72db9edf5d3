//! Hooks through which a host vetoes selections and annotates dates.
//!
//! Both traits are implemented for plain closures, so a host can pass
//! `|date| Ok::<_, MyError>(date.day() != 13)` wherever a policy is expected.
//! [`AllowAll`] and [`NoDots`] are the behaviors used when a host supplies
//! nothing.
use crate::date::CalendarDate;
use std::collections::BTreeSet;
use std::convert::Infallible;

/// Decides whether a date may become the selected date.
///
/// An `Err` means the policy itself failed; the triggering command passes it
/// back to its caller and leaves the calendar untouched.
pub trait SelectionPolicy {
    type Error;

    fn can_select_date(&self, date: CalendarDate) -> Result<bool, Self::Error>;
}

impl<F, E> SelectionPolicy for F
where
    F: Fn(CalendarDate) -> Result<bool, E>,
{
    type Error = E;

    fn can_select_date(&self, date: CalendarDate) -> Result<bool, E> {
        self(date)
    }
}

/// A policy that never vetoes
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct AllowAll;

impl SelectionPolicy for AllowAll {
    type Error = Infallible;

    fn can_select_date(&self, _date: CalendarDate) -> Result<bool, Infallible> {
        Ok(true)
    }
}

/// Decides whether a date's cell carries an annotation marker
pub trait DotSource {
    fn show_dot_for_date(&self, date: CalendarDate) -> bool;
}

impl<F> DotSource for F
where
    F: Fn(CalendarDate) -> bool,
{
    fn show_dot_for_date(&self, date: CalendarDate) -> bool {
        self(date)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct NoDots;

impl DotSource for NoDots {
    fn show_dot_for_date(&self, _date: CalendarDate) -> bool {
        false
    }
}

/// A fixed set of annotated dates
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DotSet(BTreeSet<CalendarDate>);

impl DotSet {
    pub fn new() -> DotSet {
        DotSet::default()
    }

    /// Returns `false` if the date was already present
    pub fn insert(&mut self, date: CalendarDate) -> bool {
        self.0.insert(date)
    }

    pub fn remove(&mut self, date: CalendarDate) -> bool {
        self.0.remove(&date)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CalendarDate> for DotSet {
    fn from_iter<I: IntoIterator<Item = CalendarDate>>(iter: I) -> DotSet {
        DotSet(iter.into_iter().collect())
    }
}

impl Extend<CalendarDate> for DotSet {
    fn extend<I: IntoIterator<Item = CalendarDate>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl DotSource for DotSet {
    fn show_dot_for_date(&self, date: CalendarDate) -> bool {
        self.contains(date)
    }
}
