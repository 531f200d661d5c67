use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Text typed into the search bar.
#[derive(Debug, Default, Clone)]
pub(crate) struct SearchForm {
    pub(crate) query: String,
}

impl SearchForm {
    /// Append a character, ignoring control input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.query.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.query.pop();
    }

    pub(crate) fn clear(&mut self) {
        self.query.clear();
    }

    /// The query with surrounding whitespace removed; `None` when blank.
    pub(crate) fn submitted_query(&self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Render the input line with a placeholder and a block cursor when
    /// focused.
    pub(crate) fn build_line(&self, focused: bool) -> Line<'static> {
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![Span::styled("Cerca: ", label_style)];
        if self.query.is_empty() && !focused {
            spans.push(Span::styled(
                "titolo o categoria (es. fantasy)",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::raw(self.query.clone()));
        }
        if focused {
            spans.push(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }
        Line::from(spans)
    }
}
