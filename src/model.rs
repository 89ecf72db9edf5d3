//! What a rendering layer needs to draw the calendar, derived from a
//! [`CalendarState`] in one pass.  Rebuilding it after every command and
//! redrawing from scratch is always correct.
use crate::date::CalendarDate;
use crate::grid::{CELL_COUNT, DAYS_IN_WEEK};
use crate::policy::DotSource;
use crate::rules::CalendarRules;
use crate::state::CalendarState;
use std::slice::ChunksExact;
use time::macros::format_description;

/// Single-letter weekday labels, Sunday first
pub static WEEKDAY_LETTERS: [&str; DAYS_IN_WEEK] = ["S", "M", "T", "W", "T", "F", "S"];

/// Two-letter weekday labels, Sunday first
pub static WEEKDAY_ABBREVIATIONS: [&str; DAYS_IN_WEEK] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CellModel {
    pub date: CalendarDate,
    pub day: u8,
    pub in_current_month: bool,
    pub selected: bool,
    pub dot: bool,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RenderModel {
    /// The shown month as "MMM yyyy", e.g., "Feb 2024"
    pub month_label: String,
    pub weekday_labels: [&'static str; DAYS_IN_WEEK],
    pub cells: [CellModel; CELL_COUNT],
}

impl RenderModel {
    pub fn build<R, S>(state: &CalendarState<R>, dots: &S) -> RenderModel
    where
        R: CalendarRules,
        S: DotSource + ?Sized,
    {
        let grid = state.grid();
        let marks = state.annotate(dots);
        let cells = std::array::from_fn(|i| {
            let cell = grid[i];
            CellModel {
                date: cell.date,
                day: cell.date.day(),
                in_current_month: cell.in_current_month,
                selected: state.is_selected(cell.date),
                dot: marks[i],
            }
        });
        RenderModel {
            month_label: month_label(state.current_month()),
            weekday_labels: WEEKDAY_LETTERS,
            cells,
        }
    }

    /// Swaps the single-letter weekday labels for two-letter ones
    pub fn with_abbreviated_weekdays(mut self) -> RenderModel {
        self.weekday_labels = WEEKDAY_ABBREVIATIONS;
        self
    }

    pub fn weeks(&self) -> ChunksExact<'_, CellModel> {
        self.cells.chunks_exact(DAYS_IN_WEEK)
    }

    pub fn selected_cell(&self) -> Option<&CellModel> {
        self.cells.iter().find(|c| c.selected)
    }
}

fn month_label(date: CalendarDate) -> String {
    date.as_date()
        .format(format_description!("[month repr:short] [year]"))
        .expect("formatting a date's month and year should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{AllowAll, DotSet, NoDots};

    fn ymd(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(ymd(2024, 2, 1)), "Feb 2024");
        assert_eq!(month_label(ymd(2025, 9, 30)), "Sep 2025");
        assert_eq!(month_label(ymd(987, 12, 1)), "Dec 0987");
    }

    #[test]
    fn test_build() {
        let state = CalendarState::new(ymd(2024, 2, 14));
        let dots = [ymd(2024, 2, 29)].into_iter().collect::<DotSet>();
        let model = RenderModel::build(&state, &dots);
        assert_eq!(model.month_label, "Feb 2024");
        assert_eq!(model.weekday_labels, ["S", "M", "T", "W", "T", "F", "S"]);
        assert_eq!(
            model.cells[0],
            CellModel {
                date: ymd(2024, 1, 28),
                day: 28,
                in_current_month: false,
                selected: false,
                dot: false,
            }
        );
        assert_eq!(
            model.cells[32],
            CellModel {
                date: ymd(2024, 2, 29),
                day: 29,
                in_current_month: true,
                selected: false,
                dot: true,
            }
        );
        assert_eq!(model.selected_cell().map(|c| c.date), Some(ymd(2024, 2, 14)));
        assert_eq!(model.cells.iter().filter(|c| c.selected).count(), 1);
        assert_eq!(model.cells.iter().filter(|c| c.dot).count(), 1);
        assert_eq!(model.weeks().count(), 6);
    }

    #[test]
    fn test_build_selection_outside_month() {
        let mut state = CalendarState::new(ymd(2024, 2, 14));
        state.select_date_with(ymd(2024, 3, 5), &AllowAll).unwrap();
        let model = RenderModel::build(&state, &NoDots);
        let selected = model.selected_cell().copied().unwrap();
        assert_eq!(selected.date, ymd(2024, 3, 5));
        assert!(!selected.in_current_month);
        state.select_date_with(ymd(2024, 6, 1), &AllowAll).unwrap();
        let model = RenderModel::build(&state, &NoDots);
        assert_eq!(model.selected_cell(), None);
    }

    #[test]
    fn test_abbreviated_weekdays() {
        let state = CalendarState::new(ymd(2025, 6, 15));
        let model = RenderModel::build(&state, &NoDots).with_abbreviated_weekdays();
        assert_eq!(model.weekday_labels[0], "Su");
        assert_eq!(model.weekday_labels[6], "Sa");
    }
}
