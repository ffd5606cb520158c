//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! and applies the estimator edits that transitions request.
//!
//! Architecture: a key reader thread feeds an mpsc channel; the event
//! loop consumes it on the main thread, one event at a time.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::debug;

use crate::types::EstimatorConfig;

use super::state::{Action, App, AppEvent, Effect, KeyMode, Screen, Transition};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// The same key means different things per mode: `a` adds a row while
/// navigating but is just a letter while editing a course name.
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent, mode: KeyMode) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        KeyMode::Navigate => map_navigate(key),
        KeyMode::Text => map_text(key),
        KeyMode::Modal => map_modal(key),
    }
}

fn map_navigate(key: KeyEvent) -> Option<Action> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Some(Action::MoveRight),

        // Editing
        KeyCode::Enter | KeyCode::Char('e') => Some(Action::Edit),

        // Rows
        KeyCode::Char('a') => Some(Action::AddRow),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::RemoveRow),

        // Actions
        KeyCode::Char('c') => Some(Action::Calculate),
        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

fn map_text(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => Some(Action::Finish),
        KeyCode::Backspace => Some(Action::Backspace),
        // Shift is part of the character; other modifiers are not typing
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            Some(Action::Input(c))
        }
        _ => None,
    }
}

fn map_modal(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::Dismiss),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                // Windows reports releases too; only presses are input
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(AppEvent::Key(key))
                }
                Ok(Event::Resize(..)) => tx.send(AppEvent::Resize),
                Ok(_) => Ok(()), // ignore mouse, focus, paste
                Err(_) => break,
            };
            if forwarded.is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI event loop.
///
/// Sets up the terminal, spawns the key reader, and processes events
/// until the user quits.
pub fn run(config: EstimatorConfig) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(config);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);

    loop {
        // Render
        terminal.draw(|frame| render(&app, frame))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Block on next event
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // reader gone
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key, app.key_mode()) {
                    dispatch(&mut app, &action);
                }
            }
            AppEvent::Resize => {} // redrawn at the top of the loop
        }
    }

    restore_terminal()?;
    Ok(())
}

/// Run one action through the pure transition and apply the outcome.
pub(crate) fn dispatch(app: &mut App, action: &Action) {
    let screen = std::mem::take(&mut app.screen);
    match update(screen, action, &app.estimator) {
        Transition::Screen(new_screen) => {
            app.screen = new_screen;
        }
        Transition::Quit => {
            app.should_quit = true;
        }
        Transition::Effect { screen, effect } => {
            app.screen = screen;
            handle_effect(effect, app);
        }
    }
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Apply an estimator edit requested by a pure transition.
fn handle_effect(effect: Effect, app: &mut App) {
    match effect {
        Effect::SetName { id, text } => app.estimator.update_name(id, &text),
        Effect::SetCredits { id, text } => app.estimator.update_credits(id, &text),
        Effect::SetMarks { id, text } => app.estimator.update_marks(id, &text),
        Effect::AddSubject => {
            app.estimator.add_subject();
        }
        Effect::RemoveSubject { id } => {
            app.estimator.remove_subject(id);
        }
        Effect::Calculate => {
            if let Err(e) = app.estimator.calculate() {
                // Blocking notice; the overlay stays as it was
                app.screen = Screen::notice(app.screen.cursor(), e.to_string());
            }
        }
        Effect::DismissResult => {
            app.estimator.dismiss();
            debug!("result dismissed");
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ResultOverlay;
    use crate::tui::state::{Column, Cursor};
    use crate::types::SubjectId;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // --- key mapping ---

    #[test]
    fn ctrl_c_maps_to_quit_in_every_mode() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [KeyMode::Navigate, KeyMode::Text, KeyMode::Modal] {
            assert_eq!(map_key(key, mode), Some(Action::Quit));
        }
    }

    #[test]
    fn vim_keys_map_to_movement() {
        let nav = KeyMode::Navigate;
        assert_eq!(map_key(press(KeyCode::Char('j')), nav), Some(Action::MoveDown));
        assert_eq!(map_key(press(KeyCode::Char('k')), nav), Some(Action::MoveUp));
        assert_eq!(map_key(press(KeyCode::Char('h')), nav), Some(Action::MoveLeft));
        assert_eq!(map_key(press(KeyCode::Char('l')), nav), Some(Action::MoveRight));
    }

    #[test]
    fn arrow_keys_map_to_movement() {
        let nav = KeyMode::Navigate;
        assert_eq!(map_key(press(KeyCode::Up), nav), Some(Action::MoveUp));
        assert_eq!(map_key(press(KeyCode::Down), nav), Some(Action::MoveDown));
        assert_eq!(map_key(press(KeyCode::Tab), nav), Some(Action::MoveRight));
    }

    #[test]
    fn command_keys_in_navigate_mode() {
        let nav = KeyMode::Navigate;
        assert_eq!(map_key(press(KeyCode::Char('a')), nav), Some(Action::AddRow));
        assert_eq!(map_key(press(KeyCode::Char('d')), nav), Some(Action::RemoveRow));
        assert_eq!(map_key(press(KeyCode::Char('c')), nav), Some(Action::Calculate));
        assert_eq!(map_key(press(KeyCode::Enter), nav), Some(Action::Edit));
        assert_eq!(map_key(press(KeyCode::Char('q')), nav), Some(Action::Quit));
    }

    #[test]
    fn letters_are_input_in_text_mode() {
        let text = KeyMode::Text;
        assert_eq!(map_key(press(KeyCode::Char('a')), text), Some(Action::Input('a')));
        assert_eq!(map_key(press(KeyCode::Char('q')), text), Some(Action::Input('q')));
        assert_eq!(map_key(press(KeyCode::Backspace), text), Some(Action::Backspace));
        assert_eq!(map_key(press(KeyCode::Esc), text), Some(Action::Finish));
    }

    #[test]
    fn modified_letters_are_not_typed() {
        let text = KeyMode::Text;
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        let shift_a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);

        assert_eq!(map_key(ctrl_a, text), None);
        assert_eq!(map_key(alt_x, text), None);
        assert_eq!(map_key(shift_a, text), Some(Action::Input('A')));
    }

    #[test]
    fn enter_and_esc_dismiss_modals() {
        let modal = KeyMode::Modal;
        assert_eq!(map_key(press(KeyCode::Enter), modal), Some(Action::Dismiss));
        assert_eq!(map_key(press(KeyCode::Esc), modal), Some(Action::Dismiss));
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(press(KeyCode::Char('z')), KeyMode::Navigate), None);
        assert_eq!(map_key(press(KeyCode::Char('z')), KeyMode::Modal), None);
    }

    // --- dispatch ---

    fn type_into(app: &mut App, column: Column, text: &str) {
        app.screen = Screen::table(Cursor {
            row: app.screen.cursor().row,
            column,
        });
        dispatch(app, &Action::Edit);
        for c in text.chars() {
            dispatch(app, &Action::Input(c));
        }
        dispatch(app, &Action::Finish);
    }

    #[test]
    fn typing_updates_grade_on_every_keystroke() {
        let mut app = App::new(EstimatorConfig::default());
        app.screen = Screen::table(Cursor {
            row: 0,
            column: Column::Marks,
        });
        dispatch(&mut app, &Action::Edit);

        dispatch(&mut app, &Action::Input('4'));
        assert_eq!(app.estimator.subjects().get(0).unwrap().grade_label(), "F");

        dispatch(&mut app, &Action::Input('5'));
        assert_eq!(app.estimator.subjects().get(0).unwrap().grade_label(), "C");
    }

    #[test]
    fn full_session_calculates_and_dismisses() {
        let mut app = App::new(EstimatorConfig::default());
        type_into(&mut app, Column::Credits, "4");
        type_into(&mut app, Column::Marks, "90");
        dispatch(&mut app, &Action::MoveDown);
        type_into(&mut app, Column::Credits, "2");
        type_into(&mut app, Column::Marks, "55");

        dispatch(&mut app, &Action::Calculate);
        let shown = app.estimator.overlay().tgpa().expect("result shown");
        assert_eq!(shown.to_string(), "8.67");

        dispatch(&mut app, &Action::Dismiss);
        assert_eq!(app.estimator.overlay(), ResultOverlay::Hidden);
    }

    #[test]
    fn failed_calculate_raises_notice() {
        let mut app = App::new(EstimatorConfig::default());
        dispatch(&mut app, &Action::Calculate);
        match &app.screen {
            Screen::Notice { message, .. } => {
                assert!(message.contains("valid credits and marks"));
            }
            other => panic!("Expected notice, got {:?}", other),
        }
        assert!(!app.estimator.overlay().is_shown());

        dispatch(&mut app, &Action::Dismiss);
        assert!(matches!(app.screen, Screen::Table { .. }));
    }

    #[test]
    fn add_and_remove_rows() {
        let mut app = App::new(EstimatorConfig {
            initial_rows: 1,
            ..Default::default()
        });
        dispatch(&mut app, &Action::AddRow);
        assert_eq!(app.estimator.subjects().len(), 2);
        assert_eq!(app.screen.cursor().row, 1);

        dispatch(&mut app, &Action::RemoveRow);
        assert_eq!(app.estimator.subjects().len(), 1);
        assert_eq!(app.screen.cursor().row, 0);

        dispatch(&mut app, &Action::RemoveRow);
        assert_eq!(app.estimator.subjects().len(), 1);
        assert!(app.estimator.subjects().find(SubjectId(1)).is_some());
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = App::new(EstimatorConfig::default());
        dispatch(&mut app, &Action::Quit);
        assert!(app.should_quit);
    }
}
