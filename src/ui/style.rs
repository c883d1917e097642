//! Colors and text modifiers.
//!
//! Uses ANSI colors so the editor follows the terminal's palette.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{InlineStyle, StyleSet};

pub const fn modifier_for(style: InlineStyle) -> Modifier {
    match style {
        InlineStyle::Bold => Modifier::BOLD,
        InlineStyle::Italic => Modifier::ITALIC,
        InlineStyle::Underline => Modifier::UNDERLINED,
        InlineStyle::Strikethrough => Modifier::CROSSED_OUT,
    }
}

/// Terminal style for text carrying `styles`.
pub fn text_style(styles: StyleSet) -> Style {
    let modifier = styles
        .iter()
        .fold(Modifier::empty(), |acc, style| acc | modifier_for(style));
    Style::default().add_modifier(modifier)
}

pub fn selection_style(base: Style) -> Style {
    base.bg(Color::Blue).fg(Color::White)
}

pub fn toolbar_style() -> Style {
    Style::default().bg(Color::Indexed(236)).fg(Color::White)
}

pub fn button_style(active: bool) -> Style {
    if active {
        Style::default()
            .bg(Color::Cyan)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

pub fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().bg(Color::White).fg(Color::Black)
    } else {
        Style::default().bg(Color::Black).fg(Color::White)
    }
}

pub fn image_placeholder_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::ITALIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_style_combines_modifiers() {
        let styles: StyleSet = [InlineStyle::Bold, InlineStyle::Strikethrough]
            .into_iter()
            .collect();
        let style = text_style(styles);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::CROSSED_OUT));
        assert!(!style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_unstyled_text_has_no_modifiers() {
        assert_eq!(text_style(StyleSet::empty()), Style::default());
    }
}
