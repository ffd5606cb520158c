//! Pure state transitions: (Screen, Action) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Each screen defines which actions it accepts. Unhandled actions
//! return the current screen unchanged (no-op).

use crate::estimator::Estimator;
use crate::types::Subject;

use super::state::{Action, Column, Cursor, Effect, Screen, Transition};

/// Pure state transition function.
///
/// Given the current screen, an action, and a read-only view of the
/// estimator, produces the next transition. The effects boundary
/// interprets the result.
pub fn update(screen: Screen, action: &Action, estimator: &Estimator) -> Transition {
    // The result overlay sits above every screen.
    if estimator.overlay().is_shown() {
        return update_result(screen, action);
    }

    match screen {
        Screen::Table { cursor } => update_table(cursor, action, estimator),
        Screen::Editing { cursor, buffer } => update_editing(cursor, buffer, action, estimator),
        Screen::Notice { cursor, message } => update_notice(cursor, message, action),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Result overlay: dismiss or quit, nothing else.
fn update_result(screen: Screen, action: &Action) -> Transition {
    match action {
        Action::Dismiss => Transition::Effect {
            screen,
            effect: Effect::DismissResult,
        },
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(screen),
    }
}

/// Table: cursor movement, row commands, calculate.
fn update_table(cursor: Cursor, action: &Action, estimator: &Estimator) -> Transition {
    let subjects = estimator.subjects();
    let len = subjects.len();

    match action {
        Action::MoveUp => Transition::Screen(Screen::table(Cursor {
            row: cursor.row.saturating_sub(1),
            ..cursor
        })),
        Action::MoveDown => {
            let row = if len == 0 { 0 } else { (cursor.row + 1).min(len - 1) };
            Transition::Screen(Screen::table(Cursor { row, ..cursor }))
        }
        Action::MoveLeft => Transition::Screen(Screen::table(Cursor {
            column: cursor.column.prev(),
            ..cursor
        })),
        Action::MoveRight => Transition::Screen(Screen::table(Cursor {
            column: cursor.column.next(),
            ..cursor
        })),
        Action::Edit => match subjects.get(cursor.row) {
            Some(subject) => {
                Transition::Screen(Screen::editing(cursor, cell_text(subject, cursor.column)))
            }
            None => Transition::Screen(Screen::table(cursor)),
        },
        Action::AddRow => Transition::Effect {
            // The new row lands at the end; follow it.
            screen: Screen::table(Cursor { row: len, ..cursor }),
            effect: Effect::AddSubject,
        },
        Action::RemoveRow => match subjects.get(cursor.row) {
            Some(subject) if subjects.can_remove() => {
                let row = cursor.row.min(len - 2);
                Transition::Effect {
                    screen: Screen::table(Cursor { row, ..cursor }),
                    effect: Effect::RemoveSubject { id: subject.id },
                }
            }
            // Last row (or stale cursor): nothing to do
            _ => Transition::Screen(Screen::table(cursor)),
        },
        Action::Calculate => Transition::Effect {
            screen: Screen::table(cursor),
            effect: Effect::Calculate,
        },
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::table(cursor)),
    }
}

/// Editing: every accepted keystroke updates the buffer and the model.
fn update_editing(
    cursor: Cursor,
    buffer: String,
    action: &Action,
    estimator: &Estimator,
) -> Transition {
    let Some(subject) = estimator.subjects().get(cursor.row) else {
        return Transition::Screen(Screen::table(cursor));
    };

    match action {
        Action::Input(c) => {
            if !accepts_char(cursor.column, *c) {
                return Transition::Screen(Screen::editing(cursor, buffer));
            }
            let mut next = buffer;
            next.push(*c);
            edit_transition(cursor, next, subject)
        }
        Action::Backspace => {
            let mut next = buffer;
            if next.pop().is_none() {
                return Transition::Screen(Screen::editing(cursor, next));
            }
            edit_transition(cursor, next, subject)
        }
        Action::Finish => Transition::Screen(Screen::table(cursor)),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::editing(cursor, buffer)),
    }
}

/// Notice: dismiss returns to the table.
fn update_notice(cursor: Cursor, message: String, action: &Action) -> Transition {
    match action {
        Action::Dismiss => Transition::Screen(Screen::table(cursor)),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::notice(cursor, message)),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Current text of a cell, used to seed the edit buffer.
fn cell_text(subject: &Subject, column: Column) -> String {
    match column {
        Column::Name => subject.name.clone(),
        Column::Credits => subject.credits_text(),
        Column::Marks => subject.marks_text().to_string(),
    }
}

/// Numeric cells take digits and a sign; the name takes anything printable.
fn accepts_char(column: Column, c: char) -> bool {
    if column.is_numeric() {
        c.is_ascii_digit() || c == '-'
    } else {
        !c.is_control()
    }
}

/// Stay in edit mode with `buffer` and push it into the focused cell.
fn edit_transition(cursor: Cursor, buffer: String, subject: &Subject) -> Transition {
    let id = subject.id;
    let text = buffer.clone();
    let effect = match cursor.column {
        Column::Name => Effect::SetName { id, text },
        Column::Credits => Effect::SetCredits { id, text },
        Column::Marks => Effect::SetMarks { id, text },
    };
    Transition::Effect {
        screen: Screen::editing(cursor, buffer),
        effect,
    }
}

// ============================================================================
// TESTS
// ============================================================================
