use crate::help::Help;
use crate::hooks::{Annotations, DateBounds};
use crate::theme::{BASE_STYLE, DEFAULT_DOT_COLOR, STATUS_STYLE, VETOED_STATUS_STYLE};
use crate::widget::{MonthLayout, MonthView};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind, read,
};
use monthpick::{
    CalendarDate, CalendarRules, CalendarState, Command, CommandOutcome, DateSelected, RenderModel,
};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::Color,
    text::Line,
    widgets::Widget,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Two clicks on the same spot at most this far apart make a double-click
const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Clone, Debug)]
pub(crate) struct App {
    calendar: CalendarState,
    bounds: DateBounds,
    annotations: Annotations,
    today: CalendarDate,
    dot_color: Color,
    state: AppState,
    status: Option<Status>,
    /// Where the calendar was last drawn, for hit-testing the mouse
    layout: Option<MonthLayout>,
    last_click: Option<(Instant, Position)>,
}

impl App {
    pub(crate) fn new(calendar: CalendarState, today: CalendarDate) -> App {
        App {
            calendar,
            bounds: DateBounds::default(),
            annotations: Annotations::default(),
            today,
            dot_color: DEFAULT_DOT_COLOR,
            state: AppState::Calendar,
            status: None,
            layout: None,
            last_click: None,
        }
    }

    pub(crate) fn bounds(mut self, bounds: DateBounds) -> App {
        self.bounds = bounds;
        self
    }

    pub(crate) fn annotations(mut self, annotations: Annotations) -> App {
        self.annotations = annotations;
        self
    }

    pub(crate) fn dot_color(mut self, color: Color) -> App {
        self.dot_color = color;
        self
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        if let Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) = event
        {
            if !self.handle_mouse(kind, Position::new(column, row), Instant::now()) {
                self.beep()?;
            }
        } else if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the command was
    // refused
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
                    !self.dispatch(Command::SwipeLeft).is_rejected()
                }
                KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => {
                    !self.dispatch(Command::SwipeRight).is_rejected()
                }
                KeyCode::Char('j') | KeyCode::Down => self.move_selection(7),
                KeyCode::Char('k') | KeyCode::Up => self.move_selection(-7),
                KeyCode::Char('t' | '0') | KeyCode::Home => {
                    !self.dispatch(Command::Today).is_rejected()
                }
                KeyCode::Char('x') | KeyCode::Backspace | KeyCode::Delete => {
                    self.calendar.clear_selection();
                    self.status = None;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the click was refused
    fn handle_mouse(&mut self, kind: MouseEventKind, pos: Position, now: Instant) -> bool {
        if kind != MouseEventKind::Down(MouseButton::Left) {
            return true;
        }
        if self.state == AppState::Helping {
            self.state = AppState::Calendar;
            return true;
        }
        let Some(layout) = self.layout else {
            return true;
        };
        if !layout.area().contains(pos) {
            return true;
        }
        let double = self
            .last_click
            .is_some_and(|(then, p)| p == pos && now.duration_since(then) <= DOUBLE_CLICK_INTERVAL);
        if double {
            self.last_click = None;
            let y = layout.logical_y(pos.y);
            if self.dispatch(Command::DoubleTapHeader { y }) == CommandOutcome::WentToToday {
                return true;
            }
        } else {
            self.last_click = Some((now, pos));
        }
        match layout.cell_at(pos.x, pos.y) {
            Some(i) => {
                let date = self.calendar.grid()[i].date;
                !self.dispatch(Command::TapCell(date)).is_rejected()
            }
            None => true,
        }
    }

    fn dispatch(&mut self, command: Command) -> CommandOutcome {
        let outcome = match self.calendar.apply(command, self.today, &self.bounds) {
            Ok(outcome) => outcome,
            Err(e) => match e {},
        };
        log::debug!("{command:?} -> {outcome:?}");
        for DateSelected(date) in self.calendar.take_notifications() {
            self.status = Some(Status::Selected(date));
        }
        if let CommandOutcome::Vetoed(date) = outcome {
            self.status = Some(Status::Vetoed(date));
        }
        outcome
    }

    /// Selects the date `days` days from the current selection (or from the
    /// shown date if nothing is selected), showing its month if it is not on
    /// the grid
    fn move_selection(&mut self, days: i64) -> bool {
        let from = self
            .calendar
            .selected_date()
            .unwrap_or_else(|| self.calendar.current_month());
        let Some(date) = self.calendar.rules().add_days(from, days) else {
            return false;
        };
        if self.dispatch(Command::TapCell(date)).is_rejected() {
            return false;
        }
        if !self.calendar.grid().contains(date) && self.calendar.show_month(date).is_err() {
            log::debug!("{date} is selected but cannot be shown");
        }
        true
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        self.layout = Some(MonthLayout::new(cal_area));
        let model = RenderModel::build(&self.calendar, &self.annotations);
        MonthView::new(&model, self.today, self.dot_color).render(cal_area, buf);
        if let Some(status) = self.status {
            status.line().render(status_area, buf);
        }
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}

/// The last thing that happened to the selection
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Status {
    Selected(CalendarDate),
    Vetoed(CalendarDate),
}

impl Status {
    fn line(self) -> Line<'static> {
        let line = match self {
            Status::Selected(date) => Line::styled(format!("Selected {date}"), STATUS_STYLE),
            Status::Vetoed(date) => {
                Line::styled(format!("Cannot select {date}"), VETOED_STATUS_STYLE)
            }
        };
        line.centered()
    }
}
