use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
};

/// Renders its lines centered in the target area, on top of whatever is
/// already there. Used for the game-over message.
#[derive(Debug)]
pub struct Overlay<T: ToString> {
    lines: Vec<T>,
    style: Style,
}

impl<T: ToString> Overlay<T> {
    pub fn new(lines: Vec<T>) -> Self {
        Overlay { lines, style: Style::default() }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl<T: ToString> Widget for Overlay<T> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let height = self.lines.len() as u16;
        let [area] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);

        let lines = self.lines.iter().map(|line| Line::from(line.to_string())).collect::<Vec<_>>();
        Paragraph::new(lines).style(self.style).alignment(Alignment::Center).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;

    use super::*;

    #[test]
    fn test_overlay_centers_its_lines() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 5));
        Overlay::new(vec!["over"]).render(buf.area, &mut buf);

        let mut expected = Buffer::empty(Rect::new(0, 0, 10, 5));
        expected.set_string(3, 2, "over", Style::default());
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_overlay_applies_its_style() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        Overlay::new(vec!["hi"]).style(Style::default().fg(Color::Red)).render(buf.area, &mut buf);

        let cell = buf.cell((4, 1)).unwrap();
        assert_eq!(cell.symbol(), "h");
        assert_eq!(cell.style().fg, Some(Color::Red));
    }
}
