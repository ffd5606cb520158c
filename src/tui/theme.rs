//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer.
//!
//! Color semantics:
//! - Red: brand accent (grades, result value, modal borders)
//! - Yellow: warning (blocking notice)
//! - Cyan: interactive elements (keybinding hints, focused cell)
//! - Dim: de-emphasized (placeholders, disabled hints)
//! - Bold: important (grade points, headers)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Brand accent (red).
pub const STYLE_ACCENT: Style = Style::new().fg(Color::Red);

/// Warning or attention needed (yellow).
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

/// Interactive element or keybinding hint (cyan).
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized text and placeholders (dark gray).
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text (bold).
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Table column headers.
pub const STYLE_HEADER: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::BOLD);

/// Letter grade badge.
pub const STYLE_GRADE: Style = Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD);

/// Focused cell while browsing.
pub const STYLE_SELECTED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Focused cell while editing.
pub const STYLE_EDITING: Style = Style::new().fg(Color::Black).bg(Color::Yellow);

/// Cursor row.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// The computed TGPA in the result modal.
pub const STYLE_RESULT: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_styles_have_expected_colors() {
        assert_eq!(STYLE_ACCENT.fg, Some(Color::Red));
        assert_eq!(STYLE_WARNING.fg, Some(Color::Yellow));
        assert_eq!(STYLE_INTERACTIVE.fg, Some(Color::Cyan));
        assert_eq!(STYLE_DIM.fg, Some(Color::DarkGray));
    }

    #[test]
    fn important_style_is_bold() {
        assert!(STYLE_IMPORTANT.add_modifier.contains(Modifier::BOLD));
        assert!(STYLE_RESULT.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn cursor_style_is_reversed() {
        assert!(STYLE_CURSOR.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn editing_and_selected_cells_differ() {
        assert_ne!(STYLE_EDITING, STYLE_SELECTED);
    }
}
