//! Grade mapping: marks to letter grade and grade point.
//!
//! Pure functions with no I/O.

use crate::types::Grade;

/// Highest marks value a subject can carry.
pub const MAX_MARKS: u8 = 100;

/// One row of the grading reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeBand {
    pub grade: Grade,
    /// Lowest marks value in the band (inclusive).
    pub min: u8,
    /// Highest marks value in the band (inclusive).
    pub max: u8,
}

impl GradeBand {
    /// Range as shown in the reference table: "90-100", "<40".
    pub fn range_label(&self) -> String {
        if self.min == 0 {
            format!("<{}", u16::from(self.max) + 1)
        } else {
            format!("{}-{}", self.min, self.max)
        }
    }
}

/// The grading scale, best grade first.
pub const GRADE_BANDS: [GradeBand; 7] = [
    GradeBand { grade: Grade::O, min: 90, max: 100 },
    GradeBand { grade: Grade::APlus, min: 80, max: 89 },
    GradeBand { grade: Grade::A, min: 70, max: 79 },
    GradeBand { grade: Grade::BPlus, min: 60, max: 69 },
    GradeBand { grade: Grade::B, min: 50, max: 59 },
    GradeBand { grade: Grade::C, min: 40, max: 49 },
    GradeBand { grade: Grade::F, min: 0, max: 39 },
];

/// Map a marks value to its letter grade.
///
/// Thresholds are checked from the top down; the first match wins.
/// Values above 100 grade as 100 would.
pub fn grade_of(marks: u8) -> Grade {
    match marks {
        90.. => Grade::O,
        80..=89 => Grade::APlus,
        70..=79 => Grade::A,
        60..=69 => Grade::BPlus,
        50..=59 => Grade::B,
        40..=49 => Grade::C,
        _ => Grade::F,
    }
}

/// Map a marks value to its grade point.
pub fn grade_point_of(marks: u8) -> u8 {
    grade_of(marks).point()
}

// ============================================================================
// TESTS
// ============================================================================
