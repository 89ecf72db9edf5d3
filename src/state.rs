use crate::date::{CalendarDate, MAX_YEAR, MIN_YEAR};
use crate::grid::{compute_grid, Grid, CELL_COUNT};
use crate::policy::{DotSource, SelectionPolicy};
use crate::rules::{CalendarRules, Gregorian};
use thiserror::Error;

/// Notification queued for the host whenever a date becomes selected
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateSelected(pub CalendarDate);

/// The month being shown, the selected date, and the grid derived from the
/// former.
///
/// Every command runs to completion before returning; callers that share a
/// `CalendarState` between threads must serialize access themselves.
///
/// Successful selections queue a [`DateSelected`] that stays in the state
/// (and counts towards equality) until [`take_notifications`] drains it.
/// Hosts are expected to drain after every command.
///
/// [`take_notifications`]: CalendarState::take_notifications
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarState<R = Gregorian> {
    rules: R,
    // Only the (year, month) is shown.  The day is carried along and
    // clamped to the end of shorter months when paging.
    current_month: CalendarDate,
    selected_date: Option<CalendarDate>,
    grid: Grid,
    notifications: Vec<DateSelected>,
}

impl CalendarState<Gregorian> {
    /// Shows the month containing `today` with `today` selected
    pub fn new(today: CalendarDate) -> Self {
        CalendarState::with_rules(Gregorian, today)
    }
}

impl<R: CalendarRules> CalendarState<R> {
    pub fn with_rules(rules: R, today: CalendarDate) -> Self {
        let grid = compute_grid(&rules, today);
        CalendarState {
            rules,
            current_month: today,
            selected_date: Some(today),
            grid,
            notifications: Vec::new(),
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn current_month(&self) -> CalendarDate {
        self.current_month
    }

    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.selected_date
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_selected(&self, date: CalendarDate) -> bool {
        self.selected_date == Some(date)
    }

    /// Returns the grid position of the selected date, if there is one and
    /// it is on screen
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_date.and_then(|d| self.grid.position(d))
    }

    /// Selects `date` unless `can_select` vetoes it.
    ///
    /// Returns `Ok(false)` without touching anything on a veto.  An error
    /// from `can_select` is returned as-is, also without touching anything.
    /// The date does not have to lie in the current month.
    pub fn select_date<F, E>(&mut self, date: CalendarDate, can_select: F) -> Result<bool, E>
    where
        F: FnOnce(CalendarDate) -> Result<bool, E>,
    {
        if !can_select(date)? {
            log::info!("selection of {date} vetoed");
            return Ok(false);
        }
        log::debug!("selected {date}");
        self.selected_date = Some(date);
        self.notifications.push(DateSelected(date));
        Ok(true)
    }

    pub fn select_date_with<P>(&mut self, date: CalendarDate, policy: &P) -> Result<bool, P::Error>
    where
        P: SelectionPolicy + ?Sized,
    {
        self.select_date(date, |d| policy.can_select_date(d))
    }

    /// Leaves nothing selected.  No notification is queued.
    pub fn clear_selection(&mut self) {
        log::debug!("cleared selection");
        self.selected_date = None;
    }

    /// Shows the next month.  The selected date is not changed.
    pub fn advance_month(&mut self) -> Result<(), OutOfTimeError> {
        self.step_month(1)
    }

    /// Shows the previous month.  The selected date is not changed.
    pub fn rewind_month(&mut self) -> Result<(), OutOfTimeError> {
        self.step_month(-1)
    }

    fn step_month(&mut self, months: i32) -> Result<(), OutOfTimeError> {
        let target = self
            .rules
            .add_months(self.current_month, months)
            .filter(|d| (MIN_YEAR..=MAX_YEAR).contains(&d.year()))
            .ok_or(OutOfTimeError)?;
        log::debug!("paged from {} to {}", self.current_month, target);
        self.set_current_month(target);
        Ok(())
    }

    /// Shows the month containing `date`, keeping `date`'s day for later
    /// paging.  The selection is not changed.
    pub fn show_month(&mut self, date: CalendarDate) -> Result<(), OutOfTimeError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return Err(OutOfTimeError);
        }
        log::debug!("showing month of {date}");
        self.set_current_month(date);
        Ok(())
    }

    /// Shows and selects `today`, bypassing any selection policy
    pub fn goto_today(&mut self, today: CalendarDate) {
        log::debug!("jumped to today ({today})");
        self.set_current_month(today);
        self.selected_date = Some(today);
        self.notifications.push(DateSelected(today));
    }

    /// Asks `dots` about every cell of the current grid, in grid order
    pub fn annotate<S: DotSource + ?Sized>(&self, dots: &S) -> [bool; CELL_COUNT] {
        let cells = self.grid.cells();
        std::array::from_fn(|i| dots.show_dot_for_date(cells[i].date))
    }

    /// Removes and returns the notifications queued since the last call, oldest
    /// first
    pub fn take_notifications(&mut self) -> Vec<DateSelected> {
        std::mem::take(&mut self.notifications)
    }

    fn set_current_month(&mut self, date: CalendarDate) {
        if !date.same_month(self.current_month) {
            self.grid = compute_grid(&self.rules, date);
        }
        self.current_month = date;
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{AllowAll, DotSet};
    use std::cell::Cell;
    use time::Month;

    fn ymd(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn always(_: CalendarDate) -> Result<bool, ()> {
        Ok(true)
    }

    fn never(_: CalendarDate) -> Result<bool, ()> {
        Ok(false)
    }

    fn assert_selection_invariant<R: CalendarRules>(state: &CalendarState<R>) {
        let selected = state
            .grid()
            .iter()
            .enumerate()
            .filter(|(_, c)| state.is_selected(c.date))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        assert!(selected.len() <= 1, "at most one cell should be selected");
        assert_eq!(selected.first().copied(), state.selected_index());
        if let Some(&i) = selected.first() {
            assert_eq!(Some(state.grid()[i].date), state.selected_date());
        }
    }

    #[test]
    fn test_new() {
        let today = ymd(2025, 3, 14);
        let mut state = CalendarState::new(today);
        assert_eq!(state.current_month(), today);
        assert_eq!(state.selected_date(), Some(today));
        assert_eq!(state.grid(), &compute_grid(&Gregorian, today));
        assert_eq!(state.selected_index(), state.grid().position(today));
        assert_eq!(state.take_notifications(), Vec::new());
    }

    #[test]
    fn test_select_outside_current_month() {
        let mut state = CalendarState::new(ymd(2025, 3, 14));
        state.take_notifications();
        assert_eq!(state.select_date(ymd(2025, 7, 4), always), Ok(true));
        assert_eq!(state.selected_date(), Some(ymd(2025, 7, 4)));
        assert_eq!(state.current_month(), ymd(2025, 3, 14));
        assert_eq!(state.selected_index(), None);
        assert_eq!(
            state.take_notifications(),
            vec![DateSelected(ymd(2025, 7, 4))]
        );
        assert_selection_invariant(&state);
    }

    #[test]
    fn test_select_padding_cell() {
        let mut state = CalendarState::new(ymd(2024, 2, 10));
        assert_eq!(state.select_date_with(ymd(2024, 3, 2), &AllowAll), Ok(true));
        assert_eq!(state.selected_index(), Some(34));
        assert_selection_invariant(&state);
    }

    #[test]
    fn test_veto() {
        let mut state = CalendarState::new(ymd(2025, 3, 14));
        assert_eq!(state.select_date(ymd(2025, 3, 20), never), Ok(false));
        assert_eq!(state.selected_date(), Some(ymd(2025, 3, 14)));
        assert_eq!(state.take_notifications(), Vec::new());
        assert_selection_invariant(&state);
    }

    #[test]
    fn test_veto_sees_requested_date() {
        let mut state = CalendarState::new(ymd(2025, 3, 14));
        let asked = Cell::new(None);
        let r = state.select_date(ymd(2025, 3, 22), |d| {
            asked.set(Some(d));
            Ok::<_, ()>(true)
        });
        assert_eq!(r, Ok(true));
        assert_eq!(asked.get(), Some(ymd(2025, 3, 22)));
    }

    #[test]
    fn test_policy_failure_propagates() {
        let mut state = CalendarState::new(ymd(2025, 3, 14));
        let before = state.clone();
        let r = state.select_date(ymd(2025, 3, 20), |_| Err::<bool, _>("lookup failed"));
        assert_eq!(r, Err("lookup failed"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_clear_selection() {
        let mut state = CalendarState::new(ymd(2025, 3, 14));
        state.clear_selection();
        assert_eq!(state.selected_date(), None);
        assert_eq!(state.selected_index(), None);
        assert_eq!(state.take_notifications(), Vec::new());
        assert_selection_invariant(&state);
    }

    #[test]
    fn test_advance_clamps_month_end() {
        let mut state = CalendarState::new(ymd(2025, 1, 31));
        assert_eq!(state.advance_month(), Ok(()));
        let month = state.current_month();
        assert_eq!((month.year(), month.month()), (2025, Month::February));
        assert_eq!(month.day(), 28);
        assert_eq!(state.grid().first_date(), ymd(2025, 1, 26));
        assert_eq!(state.grid().in_month_count(), 28);
    }

    #[test]
    fn test_advance_keeps_selection() {
        let mut state = CalendarState::new(ymd(2025, 1, 31));
        state.advance_month().unwrap();
        assert_eq!(state.selected_date(), Some(ymd(2025, 1, 31)));
        // January 31st is still shown in February's leading row
        assert_eq!(state.selected_index(), Some(5));
        state.advance_month().unwrap();
        assert_eq!(state.selected_index(), None);
        assert_eq!(state.take_notifications(), Vec::new());
        assert_selection_invariant(&state);
    }

    #[test]
    fn test_advance_then_rewind() {
        for month in 1..=12 {
            for day in [1, 15, 28, 29, 30, 31] {
                let Ok(start) = CalendarDate::new(2024, month, day) else {
                    continue;
                };
                let mut state = CalendarState::new(start);
                state.advance_month().unwrap();
                state.rewind_month().unwrap();
                assert!(
                    state.current_month().same_month(start),
                    "paging forwards and back from {start} should return to its month"
                );
                let mut state = CalendarState::new(start);
                state.rewind_month().unwrap();
                state.advance_month().unwrap();
                assert!(state.current_month().same_month(start));
            }
        }
    }

    #[test]
    fn test_rewind_across_year() {
        let mut state = CalendarState::new(ymd(2025, 1, 10));
        state.rewind_month().unwrap();
        assert_eq!(state.current_month(), ymd(2024, 12, 10));
        assert_eq!(state.grid().first_date(), ymd(2024, 12, 1));
    }

    #[test]
    fn test_end_of_time() {
        let mut state = CalendarState::new(ymd(MAX_YEAR, 12, 31));
        let before = state.clone();
        assert_eq!(state.advance_month(), Err(OutOfTimeError));
        assert_eq!(state, before);
        let mut state = CalendarState::new(ymd(MIN_YEAR, 1, 1));
        assert_eq!(state.rewind_month(), Err(OutOfTimeError));
        assert_eq!(state.advance_month(), Ok(()));
    }

    #[test]
    fn test_goto_today() {
        let mut state = CalendarState::new(ymd(2025, 3, 14));
        state.advance_month().unwrap();
        state.advance_month().unwrap();
        state.select_date(ymd(2025, 5, 2), always).unwrap();
        state.take_notifications();
        state.goto_today(ymd(2025, 3, 15));
        assert_eq!(state.current_month(), ymd(2025, 3, 15));
        assert_eq!(state.selected_date(), Some(ymd(2025, 3, 15)));
        assert_eq!(state.grid(), &compute_grid(&Gregorian, ymd(2025, 3, 1)));
        assert_eq!(
            state.take_notifications(),
            vec![DateSelected(ymd(2025, 3, 15))]
        );
        assert_selection_invariant(&state);
    }

    #[test]
    fn test_notifications_in_order() {
        let mut state = CalendarState::new(ymd(2025, 3, 14));
        state.select_date(ymd(2025, 3, 1), always).unwrap();
        state.select_date(ymd(2025, 3, 2), never).unwrap();
        state.goto_today(ymd(2025, 3, 14));
        state.select_date(ymd(2025, 3, 3), always).unwrap();
        assert_eq!(
            state.take_notifications(),
            vec![
                DateSelected(ymd(2025, 3, 1)),
                DateSelected(ymd(2025, 3, 14)),
                DateSelected(ymd(2025, 3, 3)),
            ]
        );
        assert_eq!(state.take_notifications(), Vec::new());
    }

    #[test]
    fn test_annotate() {
        let state = CalendarState::new(ymd(2024, 2, 1));
        let dots = [ymd(2024, 1, 28), ymd(2024, 2, 29), ymd(2024, 4, 1)]
            .into_iter()
            .collect::<DotSet>();
        let before = state.clone();
        let marks = state.annotate(&dots);
        assert_eq!(state, before);
        let marked = marks
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        assert_eq!(marked, vec![0, 32]);
        let weekends = state.annotate(&|d: CalendarDate| {
            Gregorian.weekday(d) == time::Weekday::Sunday
        });
        assert_eq!(weekends.iter().filter(|&&m| m).count(), 6);
    }

    #[test]
    fn test_operation_sequence_keeps_invariants() {
        let mut state = CalendarState::new(ymd(2025, 10, 31));
        let mut expected = Some(ymd(2025, 10, 31));
        for step in 0u8..60 {
            match step % 5 {
                0 => state.advance_month().unwrap(),
                1 => {
                    let d = state.grid()[usize::from(step) % CELL_COUNT].date;
                    state.select_date(d, always).unwrap();
                    expected = Some(d);
                }
                2 => state.rewind_month().unwrap(),
                3 => {
                    let d = state.grid()[usize::from(step) * 3 % CELL_COUNT].date;
                    state.select_date(d, never).unwrap();
                }
                _ => state.advance_month().unwrap(),
            }
            assert_eq!(state.selected_date(), expected);
            assert_eq!(state.grid(), &compute_grid(&Gregorian, state.current_month()));
            assert_selection_invariant(&state);
        }
    }

    #[test]
    fn test_show_month() {
        let mut state = CalendarState::new(ymd(2024, 2, 14));
        state.take_notifications();
        assert_eq!(state.show_month(ymd(2023, 11, 30)), Ok(()));
        assert_eq!(state.current_month(), ymd(2023, 11, 30));
        assert_eq!(state.grid(), &compute_grid(&Gregorian, ymd(2023, 11, 1)));
        assert_eq!(state.selected_date(), Some(ymd(2024, 2, 14)));
        assert_eq!(state.selected_index(), None);
        assert_eq!(state.take_notifications(), Vec::new());
        state.advance_month().unwrap();
        assert_eq!(state.current_month(), ymd(2023, 12, 30));
    }

    #[test]
    fn test_notifications_accumulate_until_taken() {
        let mut state = CalendarState::new(ymd(2024, 2, 14));
        let fresh = state.clone();
        state.select_date(ymd(2024, 2, 15), always).unwrap();
        state.select_date(ymd(2024, 2, 14), always).unwrap();
        assert_ne!(state, fresh);
        assert_eq!(
            state.take_notifications(),
            vec![DateSelected(ymd(2024, 2, 15)), DateSelected(ymd(2024, 2, 14))]
        );
        assert_eq!(state, fresh);
        assert_eq!(state.take_notifications(), Vec::new());
    }

    #[test]
    fn test_padding_past_max_year() {
        let mut state = CalendarState::new(ymd(MAX_YEAR, 12, 15));
        let last = state.grid().last_date();
        assert_eq!(last.year(), MAX_YEAR + 1);
        // Padding cells can be selected like any other cell, but their month
        // cannot be shown
        assert_eq!(state.select_date(last, always), Ok(true));
        assert_eq!(state.selected_date(), Some(last));
        assert_eq!(state.show_month(last), Err(OutOfTimeError));
        assert_eq!(state.advance_month(), Err(OutOfTimeError));
        assert_eq!(state.current_month(), ymd(MAX_YEAR, 12, 15));
    }
}
