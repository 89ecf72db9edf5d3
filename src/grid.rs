use crate::date::CalendarDate;
use crate::rules::CalendarRules;
use std::iter::successors;
use std::ops::Index;
use std::slice::{ChunksExact, Iter};

pub const DAYS_IN_WEEK: usize = 7;

/// Rows in every grid, whether or not the month needs all of them
pub const WEEKS_IN_GRID: usize = 6;

pub const CELL_COUNT: usize = DAYS_IN_WEEK * WEEKS_IN_GRID;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridCell {
    pub date: CalendarDate,
    pub in_current_month: bool,
}

/// Forty-two consecutive days, Sunday-first, covering one month
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
// Invariant: cells[0] is a Sunday and each cell is one day after the last
pub struct Grid {
    cells: [GridCell; CELL_COUNT],
}

impl Grid {
    pub fn cells(&self) -> &[GridCell; CELL_COUNT] {
        &self.cells
    }

    pub fn iter(&self) -> Iter<'_, GridCell> {
        self.cells.iter()
    }

    /// Iterates over the grid's six rows, Sunday through Saturday
    pub fn weeks(&self) -> ChunksExact<'_, GridCell> {
        self.cells.chunks_exact(DAYS_IN_WEEK)
    }

    pub fn get(&self, index: usize) -> Option<&GridCell> {
        self.cells.get(index)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&GridCell> {
        if column < DAYS_IN_WEEK {
            self.cells.get(row * DAYS_IN_WEEK + column)
        } else {
            None
        }
    }

    pub fn first_date(&self) -> CalendarDate {
        self.cells[0].date
    }

    pub fn last_date(&self) -> CalendarDate {
        self.cells[CELL_COUNT - 1].date
    }

    /// Returns the position of `date` in the grid, if it is shown at all
    pub fn position(&self, date: CalendarDate) -> Option<usize> {
        if date < self.first_date() || date > self.last_date() {
            return None;
        }
        self.cells.iter().position(|c| c.date == date)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.position(date).is_some()
    }

    pub fn in_month_count(&self) -> usize {
        self.cells.iter().filter(|c| c.in_current_month).count()
    }
}

impl Index<usize> for Grid {
    type Output = GridCell;

    fn index(&self, index: usize) -> &GridCell {
        &self.cells[index]
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a GridCell;
    type IntoIter = Iter<'a, GridCell>;

    fn into_iter(self) -> Iter<'a, GridCell> {
        self.cells.iter()
    }
}

/// Lays out the month containing `anchor`.
///
/// Only the anchor's (year, month) matters.  The first cell is the Sunday on
/// or before the first of the month, and the following 41 days fill out six
/// rows, so months that fit in four or five weeks are padded with the next
/// month's leading days.
///
/// # Panics
///
/// Panics if `rules` cannot represent a day in the grid.  This does not
/// happen with [`Gregorian`](crate::Gregorian) for any anchor built through
/// [`CalendarDate`]'s public constructors.
pub fn compute_grid<R: CalendarRules + ?Sized>(rules: &R, anchor: CalendarDate) -> Grid {
    let first_of_month = rules
        .add_days(anchor, 1 - i64::from(anchor.day()))
        .expect("first day of month should be representable");
    // Sunday = 1 ... Saturday = 7
    let first_weekday = rules.weekday(first_of_month).number_from_sunday();
    let grid_start = rules
        .add_days(first_of_month, 1 - i64::from(first_weekday))
        .expect("start of grid should be representable");
    let mut days = successors(Some(grid_start), |&d| rules.add_days(d, 1));
    let cells = std::array::from_fn(|_| {
        let date = days
            .next()
            .expect("every day of the grid should be representable");
        GridCell {
            date,
            in_current_month: date.same_month(anchor),
        }
    });
    log::trace!(
        "computed grid for {}-{:02}: {} through {}",
        anchor.year(),
        anchor.month_number(),
        grid_start,
        cells[CELL_COUNT - 1].date,
    );
    Grid { cells }
}
