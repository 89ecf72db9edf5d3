use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static BINDINGS: &[(&str, &str)] = &[
    ("l, RIGHT, PAGE DOWN", "Next month"),
    ("h, LEFT, PAGE UP", "Previous month"),
    ("j, DOWN", "Select one week later"),
    ("k, UP", "Select one week earlier"),
    ("t, 0, HOME", "Jump to today"),
    ("x, BACKSPACE", "Clear the selection"),
    ("click", "Select a day"),
    ("double-click header", "Jump to today"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let mut lines = BINDINGS
            .iter()
            .map(|(keys, action)| Line::raw(format!("{keys:<21}{action}")))
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Add 2 for the borders:
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(HorizontalAlignment::Center),
            )
            .style(self.0);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lines_up() {
        let text = Help::text();
        assert_eq!(text.height(), BINDINGS.len() + 2);
        assert_eq!(
            text.lines[0].to_string(),
            "l, RIGHT, PAGE DOWN  Next month"
        );
        assert_eq!(
            text.lines[7].to_string(),
            "double-click header  Jump to today"
        );
    }

    #[test]
    fn test_render_centered() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buffer = Buffer::empty(area);
        Help(Style::new()).render(area, &mut buffer);
        // 44 columns and 12 lines of text plus borders
        assert_eq!(buffer[(7, 3)].symbol(), "┌");
        assert_eq!(buffer[(52, 3)].symbol(), "┐");
        assert_eq!(buffer[(8, 4)].symbol(), "l");
        assert_eq!(buffer[(7, 16)].symbol(), "└");
        assert_eq!(buffer[(52, 16)].symbol(), "┘");
        assert_eq!(buffer[(0, 0)].symbol(), " ");
    }
}
