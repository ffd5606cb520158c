//! TUI state algebra: pure types, zero effects.
//!
//! These types define the entire TUI state space. The transition function
//! and the rendering layer both program against them.
//!
//! Screen variants carry only per-screen transient state (cursor, edit
//! buffer, notice text). The subject table and the result overlay live in
//! the [`Estimator`] owned by [`App`].

use crossterm::event::KeyEvent;

use crate::estimator::Estimator;
use crate::types::{EstimatorConfig, SubjectId};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// The key reader thread is the only producer.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The terminal was resized; redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Current screen, carrying per-screen navigation state.
    pub screen: Screen,

    /// Subject table, overlay and policy.
    pub estimator: Estimator,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// CURSOR
// ============================================================================

/// Editable columns of the subject table, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Column {
    #[default]
    Name,
    Credits,
    Marks,
}

impl Column {
    /// Next column to the right, stopping at the last.
    pub fn next(self) -> Self {
        match self {
            Column::Name => Column::Credits,
            Column::Credits | Column::Marks => Column::Marks,
        }
    }

    /// Next column to the left, stopping at the first.
    pub fn prev(self) -> Self {
        match self {
            Column::Marks => Column::Credits,
            Column::Credits | Column::Name => Column::Name,
        }
    }

    /// Credits and marks only take numeric keystrokes.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Column::Name)
    }
}

/// Focused cell: display row index plus column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub column: Column,
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
///
/// The result overlay is not a screen: it is drawn over `Table` whenever
/// the estimator reports it as shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Browsing the table.
    Table { cursor: Cursor },

    /// Editing the focused cell. Every keystroke is applied immediately;
    /// `buffer` holds the text typed so far.
    Editing { cursor: Cursor, buffer: String },

    /// Blocking notice (calculation error). Any dismiss key returns to
    /// the table.
    Notice { cursor: Cursor, message: String },
}

/// Default screen is the table at the top-left cell.
impl Default for Screen {
    fn default() -> Self {
        Screen::Table {
            cursor: Cursor::default(),
        }
    }
}

impl Screen {
    /// Cursor of whichever variant this is.
    pub fn cursor(&self) -> Cursor {
        match self {
            Screen::Table { cursor }
            | Screen::Editing { cursor, .. }
            | Screen::Notice { cursor, .. } => *cursor,
        }
    }
}

/// How key presses should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Table navigation and commands.
    Navigate,
    /// Text entry into a cell.
    Text,
    /// A modal (result or notice) is up.
    Modal,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Start editing the focused cell.
    Edit,
    /// Type a character into the cell being edited.
    Input(char),
    /// Delete the last character of the cell being edited.
    Backspace,
    /// Leave edit mode.
    Finish,
    /// Append a row.
    AddRow,
    /// Remove the focused row.
    RemoveRow,
    /// Compute the TGPA.
    Calculate,
    /// Close the result overlay or a notice.
    Dismiss,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// Follows the Elm/TEA pattern: pure code describes WHAT should happen,
/// the effects boundary applies it.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Quit the application.
    Quit,
    /// Move to `screen` and apply `effect` to the estimator.
    Effect { screen: Screen, effect: Effect },
}

/// Change to the estimator requested by a pure transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetName { id: SubjectId, text: String },
    SetCredits { id: SubjectId, text: String },
    SetMarks { id: SubjectId, text: String },
    AddSubject,
    RemoveSubject { id: SubjectId },
    /// Run the aggregator. Failure turns into a notice.
    Calculate,
    DismissResult,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Create an App on a fresh table.
    pub fn new(config: EstimatorConfig) -> Self {
        App {
            screen: Screen::default(),
            estimator: Estimator::new(config),
            should_quit: false,
        }
    }

    /// How the next key press should be read.
    pub fn key_mode(&self) -> KeyMode {
        if self.estimator.overlay().is_shown() {
            return KeyMode::Modal;
        }
        match self.screen {
            Screen::Table { .. } => KeyMode::Navigate,
            Screen::Editing { .. } => KeyMode::Text,
            Screen::Notice { .. } => KeyMode::Modal,
        }
    }
}

impl Screen {
    /// Table screen with the given cursor.
    pub fn table(cursor: Cursor) -> Self {
        Screen::Table { cursor }
    }

    /// Edit screen seeded with the cell's current text.
    pub fn editing(cursor: Cursor, buffer: impl Into<String>) -> Self {
        Screen::Editing {
            cursor,
            buffer: buffer.into(),
        }
    }

    /// Notice screen showing `message`.
    pub fn notice(cursor: Cursor, message: impl Into<String>) -> Self {
        Screen::Notice {
            cursor,
            message: message.into(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
