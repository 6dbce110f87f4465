use inksac::prelude::*;

use crate::process::Outcome;

/// Colours user-facing messages when the terminal supports it.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    color_support: ColorSupport,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return text.to_string();
        }
        text.style(style).to_string()
    }

    pub fn error(&self, error: &str) -> String {
        let style = Style::builder().foreground(Color::Red).bold().build();
        self.paint(error, style)
    }

    pub fn success(&self, message: &str) -> String {
        let style = Style::builder().foreground(Color::Green).build();
        self.paint(message, style)
    }

    pub fn hint(&self, hint: &str) -> String {
        let style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        self.paint(hint, style)
    }

    pub fn outcome(&self, outcome: &Outcome) -> String {
        let text = outcome.to_string();
        match outcome {
            Outcome::Success => self.success(&text),
            Outcome::Background(_) => self.hint(&text),
            _ => self.error(&text),
        }
    }
}
