//! TGPA aggregation and the result overlay state machine.
//!
//! `calculate` is a pure fold over a subject snapshot. It never modifies
//! the list, so calling it twice on the same data gives the same answer.

use thiserror::Error;

use crate::subjects::SubjectList;
use crate::types::{Aggregate, Subject, Tgpa, ZeroMarksPolicy};

/// Why an average could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TgpaError {
    /// No row has both credits and marks that count.
    #[error("enter at least one subject with valid credits and marks")]
    NoGradedSubjects,
}

/// Whether a row counts towards the weighted average.
///
/// Credits must be set (and so positive). Marks must be entered; under
/// [`ZeroMarksPolicy::Exclude`] their text must also read above zero, so a
/// fractional mark like `0.5` counts with grade point 0.
pub fn contributes(subject: &Subject, policy: ZeroMarksPolicy) -> bool {
    let Some(marks) = &subject.marks else {
        return false;
    };
    if subject.credits.is_none() {
        return false;
    }
    match policy {
        ZeroMarksPolicy::Exclude => marks.is_positive(),
        ZeroMarksPolicy::Include => true,
    }
}

/// Compute the credit-weighted grade point average.
///
/// # Errors
/// Returns [`TgpaError::NoGradedSubjects`] when no row contributes.
pub fn calculate(subjects: &SubjectList, policy: ZeroMarksPolicy) -> Result<Aggregate, TgpaError> {
    let mut weighted_points: u64 = 0;
    let mut total_credits: u64 = 0;
    let mut contributing = 0;

    for subject in subjects.iter().filter(|s| contributes(s, policy)) {
        let credits = u64::from(subject.credits.unwrap_or(0));
        weighted_points += u64::from(subject.grade_point()) * credits;
        total_credits += credits;
        contributing += 1;
    }

    if total_credits == 0 {
        return Err(TgpaError::NoGradedSubjects);
    }

    Ok(Aggregate {
        tgpa: Tgpa::from_ratio(weighted_points, total_credits),
        total_credits,
        weighted_points,
        contributing,
    })
}

// ============================================================================
// RESULT OVERLAY
// ============================================================================

/// Visibility of the computed result.
///
/// `Hidden → Shown` on a successful calculation, `Shown → Hidden` on
/// dismiss. Showing again while shown just replaces the value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResultOverlay {
    #[default]
    Hidden,
    Shown(Tgpa),
}

impl ResultOverlay {
    /// Transition for a successful calculation.
    pub fn show(self, tgpa: Tgpa) -> Self {
        ResultOverlay::Shown(tgpa)
    }

    /// Transition for an explicit dismiss.
    pub fn dismiss(self) -> Self {
        ResultOverlay::Hidden
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, ResultOverlay::Shown(_))
    }

    /// The displayed value, if shown.
    pub fn tgpa(&self) -> Option<Tgpa> {
        match self {
            ResultOverlay::Shown(tgpa) => Some(*tgpa),
            ResultOverlay::Hidden => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
