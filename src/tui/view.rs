//! Pure rendering: map App state to ratatui widget trees.
//!
//! The table screen is always drawn; the result overlay and the notice
//! are modals drawn on top of it. Widget-building functions are pure
//! (state in, widgets out); the only effect is Frame::render_widget()
//! which writes to the terminal buffer.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::grade::GRADE_BANDS;
use crate::types::{Tgpa, ZeroMarksPolicy};

use super::state::{App, Column, KeyMode, Screen};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current state to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Length(3), // grading reference
        Constraint::Min(0),    // subject table
        Constraint::Length(1), // status
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(), chunks[0]);
    frame.render_widget(render_reference(), chunks[1]);
    render_table(app, frame, chunks[2]);
    frame.render_widget(render_status(app), chunks[3]);
    frame.render_widget(render_help(app), chunks[4]);

    if let Some(tgpa) = app.estimator.overlay().tgpa() {
        render_result(tgpa, frame, area);
    } else if let Screen::Notice { message, .. } = &app.screen {
        render_notice(message, frame, area);
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title() -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled("TGPA Calculator", theme::STYLE_TITLE),
        Span::styled("  estimate your term grade point average", theme::STYLE_DIM),
    ]))
}

/// One-line grading scale inside a bordered box.
fn render_reference() -> Paragraph<'static> {
    let mut spans = Vec::new();
    for band in &GRADE_BANDS {
        spans.push(Span::styled(band.grade.label(), theme::STYLE_GRADE));
        spans.push(Span::raw(format!(" {} ", band.grade.point())));
        spans.push(Span::styled(format!("({})  ", band.range_label()), theme::STYLE_DIM));
    }

    Paragraph::new(Line::from(spans)).block(
        Block::bordered()
            .title(" Grading System Reference ")
            .border_style(theme::STYLE_DIM),
    )
}

/// Row count, entered credits and the zero-marks policy.
fn render_status(app: &App) -> Paragraph<'static> {
    let subjects = app.estimator.subjects();
    let credits: u64 = subjects
        .iter()
        .filter_map(|s| s.credits)
        .map(u64::from)
        .sum();

    let mut text = format!(
        "  {} subject{}, {} credit{} entered",
        subjects.len(),
        if subjects.len() == 1 { "" } else { "s" },
        credits,
        if credits == 1 { "" } else { "s" }
    );
    if app.estimator.config().zero_marks == ZeroMarksPolicy::Include {
        text.push_str(", zero marks counted");
    }

    Paragraph::new(Span::styled(text, theme::STYLE_DIM))
}

/// Help line showing the keybindings for the current mode.
fn render_help(app: &App) -> Paragraph<'static> {
    let can_remove = app.estimator.subjects().can_remove();

    let spans = match app.key_mode() {
        KeyMode::Navigate => {
            let mut spans = Vec::new();
            spans.extend(hint("↑↓←→", "move", true));
            spans.extend(hint("Enter", "edit", true));
            spans.extend(hint("a", "add", true));
            spans.extend(hint("d", "remove", can_remove));
            spans.extend(hint("c", "calculate", true));
            spans.extend(hint("q", "quit", true));
            spans
        }
        KeyMode::Text => {
            let mut spans = hint("Enter/Esc", "done", true);
            spans.extend(hint("Backspace", "delete", true));
            spans
        }
        KeyMode::Modal => hint("Enter/Esc", "close", true),
    };

    Paragraph::new(Line::from(spans))
}

/// "[key] label" spans; disabled hints are dimmed throughout.
fn hint(key: &str, label: &str, enabled: bool) -> Vec<Span<'static>> {
    let (key_style, label_style) = if enabled {
        (theme::STYLE_INTERACTIVE, theme::STYLE_HELP)
    } else {
        (theme::STYLE_DIM, theme::STYLE_DIM)
    };
    vec![
        Span::styled(format!("[{}] ", key), key_style),
        Span::styled(format!("{}  ", label), label_style),
    ]
}

// ============================================================================
// SUBJECT TABLE
// ============================================================================

fn render_table(app: &App, frame: &mut Frame, area: Rect) {
    let cursor = app.screen.cursor();
    let buffer = match &app.screen {
        Screen::Editing { buffer, .. } => Some(buffer.as_str()),
        _ => None,
    };

    let header = Row::new(["#", "Course", "Credits", "Marks", "Grade", "GP"])
        .style(theme::STYLE_HEADER);

    let rows: Vec<Row> = app
        .estimator
        .subjects()
        .iter()
        .enumerate()
        .map(|(i, subject)| {
            let focus = (i == cursor.row).then_some(cursor.column);
            let number_style = if focus.is_some() {
                theme::STYLE_CURSOR
            } else {
                theme::STYLE_DIM
            };

            Row::new(vec![
                Cell::from(Span::styled(format!("{:>2}", i + 1), number_style)),
                input_cell(&subject.name, "Optional", focus == Some(Column::Name), buffer),
                input_cell(&subject.credits_text(), "0", focus == Some(Column::Credits), buffer),
                input_cell(subject.marks_text(), "0", focus == Some(Column::Marks), buffer),
                Cell::from(Span::styled(subject.grade_label(), theme::STYLE_GRADE)),
                Cell::from(Span::styled(
                    subject.grade_point().to_string(),
                    theme::STYLE_IMPORTANT,
                )),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(3),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::bordered()
                .title(" Subjects ")
                .border_style(theme::STYLE_DIM),
        );

    // Selecting the cursor row lets the table scroll to keep it visible
    let mut state = TableState::default().with_selected(Some(cursor.row));
    frame.render_stateful_widget(table, area, &mut state);
}

/// An editable cell: value, placeholder when empty, or the edit buffer.
fn input_cell(
    value: &str,
    placeholder: &'static str,
    focused: bool,
    buffer: Option<&str>,
) -> Cell<'static> {
    match (focused, buffer) {
        (true, Some(typed)) => Cell::from(format!("{}▏", typed)).style(theme::STYLE_EDITING),
        (true, None) => {
            let shown = if value.is_empty() { placeholder } else { value };
            Cell::from(shown.to_string()).style(theme::STYLE_SELECTED)
        }
        (false, _) if value.is_empty() => Cell::from(Span::styled(placeholder, theme::STYLE_DIM)),
        (false, _) => Cell::from(value.to_string()),
    }
}

// ============================================================================
// MODALS
// ============================================================================

fn render_result(tgpa: Tgpa, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Your Estimated TGPA", theme::STYLE_IMPORTANT)),
        Line::from(""),
        Line::from(Span::styled(tgpa.to_string(), theme::STYLE_RESULT)),
        Line::from(""),
        Line::from(Span::styled(
            "This TGPA is an estimation based on entered marks.",
            theme::STYLE_DIM,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", theme::STYLE_INTERACTIVE),
            Span::styled("close", theme::STYLE_HELP),
        ]),
    ];

    let popup = centered_rect(54, 10, area);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .title(" Result ")
                .border_style(theme::STYLE_ACCENT),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn render_notice(message: &str, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Cannot calculate TGPA", theme::STYLE_WARNING)),
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", theme::STYLE_INTERACTIVE),
            Span::styled("ok", theme::STYLE_HELP),
        ]),
    ];

    let popup = centered_rect(62, 8, area);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .title(" Notice ")
                .border_style(theme::STYLE_WARNING),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

// ============================================================================
// TESTS
// ============================================================================
