use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

/// Keys and what they do, e.g. `(&["←", "a"], "Left")`.
pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

/// Help footer. Bindings that do not fit on one line wrap to the next.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self {
            bindings,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn lines(&self, width: u16) -> Vec<Line<'a>> {
        let width = usize::from(width);
        let mut lines = vec![];
        let mut spans: Vec<Span<'a>> = vec![];
        let mut line_width = 0;

        for (keys, desc) in self.bindings.iter().copied() {
            let item = binding_spans(keys, desc);
            let item_width: usize = item.iter().map(Span::width).sum();
            if !spans.is_empty() && line_width + ITEM_SEPARATOR.len() + item_width > width {
                lines.push(Line::from(std::mem::take(&mut spans)).centered());
                line_width = 0;
            }
            if !spans.is_empty() {
                spans.push(Span::styled(ITEM_SEPARATOR, ITEM_SEPARATOR_STYLE));
                line_width += ITEM_SEPARATOR.len();
            }
            spans.extend(item);
            line_width += item_width;
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans).centered());
        }
        lines
    }
}

const ITEM_SEPARATOR: &str = " | ";

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);
const ITEM_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

fn binding_spans<'a>(keys: &'a [&'a str], desc: &'a str) -> Vec<Span<'a>> {
    let mut spans = vec![];
    for (i, key) in keys.iter().copied().enumerate() {
        if i > 0 {
            spans.push(Span::styled("/", KEY_SEPARATOR_STYLE));
        }
        spans.push(Span::styled(key, KEY_STYLE));
    }
    spans.push(Span::from(" "));
    spans.push(Span::styled(desc, DESCRIPTION_STYLE));
    spans
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for (line, row) in self.lines(area.width).into_iter().zip(area.rows()) {
            line.render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINDINGS: &[KeyBinding] = &[
        (&["←", "a"], "Left"),
        (&["→", "d"], "Right"),
        (&["Space"], "Drop"),
    ];

    #[test]
    fn test_fits_on_one_line() {
        let display = KeyBindingDisplay::new(BINDINGS);
        let lines = display.lines(80);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), "←/a Left | →/d Right | Space Drop");
    }

    #[test]
    fn test_wraps_between_bindings() {
        let display = KeyBindingDisplay::new(BINDINGS);
        let lines = display.lines(20);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "←/a Left | →/d Right");
        assert_eq!(lines[1].to_string(), "Space Drop");
    }
}
