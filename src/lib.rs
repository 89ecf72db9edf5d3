//! A single-month calendar picker engine.
//!
//! [`CalendarState`] tracks the month on display and at most one selected
//! date, and keeps a 42-cell [`Grid`] of the six Sunday-first weeks that
//! cover that month.  Hosts drive it with [`Command`]s, veto selections
//! through a [`SelectionPolicy`], annotate cells through a [`DotSource`], and
//! draw from a [`RenderModel`].
mod command;
mod date;
mod grid;
mod model;
mod policy;
mod rules;
mod state;
pub use crate::command::{Command, CommandOutcome, HEADER_BAND};
pub use crate::date::{CalendarDate, DateError, MAX_YEAR, MIN_YEAR};
pub use crate::grid::{compute_grid, Grid, GridCell, CELL_COUNT, DAYS_IN_WEEK, WEEKS_IN_GRID};
pub use crate::model::{CellModel, RenderModel, WEEKDAY_ABBREVIATIONS, WEEKDAY_LETTERS};
pub use crate::policy::{AllowAll, DotSet, DotSource, NoDots, SelectionPolicy};
pub use crate::rules::{CalendarRules, Gregorian};
pub use crate::state::{CalendarState, DateSelected, OutOfTimeError};
