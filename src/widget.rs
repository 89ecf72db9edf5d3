use crate::theme::{IN_MONTH_STYLE, MONTH_STYLE, OUT_OF_MONTH_STYLE, SELECTED_STYLE, WEEKDAY_STYLE};
use monthpick::{CalendarDate, CellModel, RenderModel, DAYS_IN_WEEK, HEADER_BAND, WEEKS_IN_GRID};
use ratatui::{prelude::*, widgets::*};

/// Number of columns per day of week
const CELL_WIDTH: u16 = 4;

const GRID_WIDTH: u16 = 7 * CELL_WIDTH;

/// Number of lines taken up by the month label and the weekday labels
const HEADER_LINES: u16 = 2;

/// Number of lines taken up by each week: the days, then their dots
const WEEK_LINES: u16 = 2;

const TOTAL_HEIGHT: u16 = HEADER_LINES + 6 * WEEK_LINES;

/// Logical units per terminal line, chosen so that the header lines make up
/// exactly the band in which a double tap jumps to today
const UNITS_PER_LINE: u16 = HEADER_BAND / HEADER_LINES;

/// Column within a day's cell at which its dot is drawn
const DOT_OFFSET: u16 = 2;

const DOT: &str = "•";

/// Where the calendar lands within the area it is drawn in, for mapping mouse
/// positions back to cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthLayout {
    area: Rect,
}

impl MonthLayout {
    pub(crate) fn new(area: Rect) -> MonthLayout {
        let left = area.width.saturating_sub(GRID_WIDTH) / 2;
        MonthLayout {
            area: Rect {
                x: area.x + left,
                y: area.y,
                width: GRID_WIDTH.min(area.width),
                height: TOTAL_HEIGHT.min(area.height),
            },
        }
    }

    pub(crate) fn area(&self) -> Rect {
        self.area
    }

    /// Distance of terminal line `row` from the top of the calendar, in
    /// logical units
    pub(crate) fn logical_y(&self, row: u16) -> u16 {
        row.saturating_sub(self.area.y)
            .saturating_mul(UNITS_PER_LINE)
    }

    /// Returns the grid index of the day drawn at the given position.  The
    /// line under a day (where its dot goes) belongs to that day.
    pub(crate) fn cell_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.area.contains(Position::new(column, row)) {
            return None;
        }
        let week = usize::from((row - self.area.y).checked_sub(HEADER_LINES)? / WEEK_LINES);
        let wd = usize::from((column - self.area.x) / CELL_WIDTH);
        (week < WEEKS_IN_GRID && wd < DAYS_IN_WEEK).then_some(week * DAYS_IN_WEEK + wd)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    model: &'a RenderModel,
    today: CalendarDate,
    dot_color: Color,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(model: &'a RenderModel, today: CalendarDate, dot_color: Color) -> Self {
        MonthView {
            model,
            today,
            dot_color,
        }
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = MonthLayout::new(area);
        let mut canvas = BufferCanvas::new(layout.area(), buf);
        canvas.draw_month_label(&self.model.month_label);
        canvas.draw_weekdays(&self.model.weekday_labels);
        for (week_no, week) in std::iter::zip(0u16.., self.model.weeks()) {
            for (wd, cell) in std::iter::zip(0u16.., week) {
                canvas.draw_day(week_no, wd, cell, cell.date == self.today);
                if cell.dot {
                    canvas.draw_dot(week_no, wd, self.dot_color);
                }
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_month_label(&mut self, label: &str) {
        let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
        self.mvprint(0, GRID_WIDTH.saturating_sub(width) / 2, label, MONTH_STYLE);
    }

    fn draw_weekdays(&mut self, labels: &[&str]) {
        for (wd, label) in std::iter::zip(0u16.., labels) {
            let s = format!("{label:^w$}", w = usize::from(CELL_WIDTH));
            self.mvprint(1, wd * CELL_WIDTH, s, WEEKDAY_STYLE);
        }
    }

    fn draw_day(&mut self, week_no: u16, wd: u16, cell: &CellModel, is_today: bool) {
        let s = if is_today {
            format!("[{:2}]", cell.day)
        } else {
            format!(" {:2} ", cell.day)
        };
        let mut style = if cell.in_current_month {
            IN_MONTH_STYLE
        } else {
            OUT_OF_MONTH_STYLE
        };
        if cell.selected {
            style = style.patch(SELECTED_STYLE);
        }
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            wd * CELL_WIDTH,
            s,
            style,
        );
    }

    fn draw_dot(&mut self, week_no: u16, wd: u16, color: Color) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES + 1,
            wd * CELL_WIDTH + DOT_OFFSET,
            DOT,
            Style::new().fg(color),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Paragraph truncates text running past the calendar's right
            // edge, so long as its own Rect stays inside the buffer.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
