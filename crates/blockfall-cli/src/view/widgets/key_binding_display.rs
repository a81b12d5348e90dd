use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

/// Keys that trigger one action, and what the action does.
#[derive(Debug, Clone, Copy)]
pub struct KeyBinding<'a> {
    pub keys: &'a [&'a str],
    pub description: &'a str,
}

impl<'a> KeyBinding<'a> {
    pub const fn new(keys: &'a [&'a str], description: &'a str) -> Self {
        Self { keys, description }
    }
}

/// One-line legend of key bindings: `←/A Left | →/D Right | ...`.
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

    fn spans(&self) -> Vec<Span<'a>> {
        let mut spans = vec![];
        for (i, binding) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            for (j, key) in binding.keys.iter().copied().enumerate() {
                if j > 0 {
                    spans.push(Span::styled("/", SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key, KEY_STYLE));
            }
            spans.push(Span::raw(" "));
            spans.push(Span::styled(binding.description, DESCRIPTION_STYLE));
        }
        spans
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        Line::from(self.spans()).centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_text() {
        let bindings = [
            KeyBinding::new(&["←", "A"], "Left"),
            KeyBinding::new(&["Q"], "Quit"),
        ];
        let text: String = KeyBindingDisplay::new(&bindings)
            .spans()
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(text, "←/A Left | Q Quit");
    }

    #[test]
    fn test_render_with_block() {
        let bindings = [KeyBinding::new(&["P"], "Pause")];
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        KeyBindingDisplay::new(&bindings)
            .block(BlockWidget::bordered())
            .render(area, &mut buf);
        let middle: String = (1..11)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert_eq!(middle.trim(), "P Pause");
    }
}
