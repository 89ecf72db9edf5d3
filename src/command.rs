use crate::date::CalendarDate;
use crate::policy::SelectionPolicy;
use crate::rules::CalendarRules;
use crate::state::CalendarState;

/// Height, in logical units from the top of the widget, of the band in which
/// a double tap jumps to today
pub const HEADER_BAND: u16 = 40;

/// A logical command, already translated from raw input by the host
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Command {
    TapCell(CalendarDate),
    /// Shows the next month
    SwipeLeft,
    /// Shows the previous month
    SwipeRight,
    /// `y` is measured in logical units from the top of the widget
    DoubleTapHeader { y: u16 },
    /// Keyboard equivalent of a double tap on the header
    Today,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommandOutcome {
    Selected(CalendarDate),
    Vetoed(CalendarDate),
    Paged,
    /// Paging would have left the supported range of years
    OutOfTime,
    WentToToday,
    /// The command did not apply, e.g. a double tap below the header
    Ignored,
}

impl CommandOutcome {
    /// Returns `true` if the command changed nothing because it was refused
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            CommandOutcome::Vetoed(_) | CommandOutcome::OutOfTime | CommandOutcome::Ignored
        )
    }
}

impl<R: CalendarRules> CalendarState<R> {
    /// Runs a logical command.  `today` is only consulted by commands that
    /// jump to today.  The only error is one raised by `policy`.
    pub fn apply<P>(
        &mut self,
        command: Command,
        today: CalendarDate,
        policy: &P,
    ) -> Result<CommandOutcome, P::Error>
    where
        P: SelectionPolicy + ?Sized,
    {
        let outcome = match command {
            Command::TapCell(date) => {
                if self.select_date_with(date, policy)? {
                    CommandOutcome::Selected(date)
                } else {
                    CommandOutcome::Vetoed(date)
                }
            }
            Command::SwipeLeft => paged(self.advance_month().is_ok()),
            Command::SwipeRight => paged(self.rewind_month().is_ok()),
            Command::DoubleTapHeader { y } if y < HEADER_BAND => {
                self.goto_today(today);
                CommandOutcome::WentToToday
            }
            Command::DoubleTapHeader { .. } => CommandOutcome::Ignored,
            Command::Today => {
                self.goto_today(today);
                CommandOutcome::WentToToday
            }
        };
        Ok(outcome)
    }
}

fn paged(ok: bool) -> CommandOutcome {
    if ok {
        CommandOutcome::Paged
    } else {
        CommandOutcome::OutOfTime
    }
}
