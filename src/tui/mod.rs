//! TUI module for the interactive subject table.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Screen, Action, Transition)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `run`: Effects (terminal, key reader, model edits)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
