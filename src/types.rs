//! Domain types for tgpa.
//!
//! Plain data: the grading vocabulary, subject rows, computed results and
//! configuration. Behaviour lives in the modules that own each concern.

use std::fmt;

use serde::{Serialize, Serializer};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Row identity, used to target edits and removals.
///
/// Issued by [`SubjectList`](crate::subjects::SubjectList) from a monotonic
/// counter, so an id is never handed out twice in one list's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SubjectId(pub u32);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marks as the user entered them.
///
/// `text` mirrors the keystrokes verbatim; `value` is the integer reading of
/// that text, clamped to [0, 100]. Grading only ever looks at `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marks {
    pub(crate) text: String,
    pub(crate) value: u8,
}

impl Marks {
    /// The raw text, as typed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The clamped numeric value in [0, 100].
    pub fn value(&self) -> u8 {
        self.value
    }
}

/// A term grade point average, already rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tgpa(f64);

impl Tgpa {
    /// Divide weighted points by credits and round to two decimals.
    ///
    /// Rounding looks at the exact binary value of the quotient, so 359/40
    /// (stored as 8.97499...) gives 8.97. Exact ties such as 8.125 go up.
    ///
    /// Callers guarantee `credits > 0`.
    pub fn from_ratio(weighted_points: u64, credits: u64) -> Self {
        let raw = weighted_points as f64 / credits as f64;
        Tgpa(round_to_cents(raw))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Round a non-negative value to two decimals.
fn round_to_cents(x: f64) -> f64 {
    let scaled = x * 100.0;
    // A third decimal of exactly 5 is only representable for multiples of 1/8.
    if (x * 8.0).fract() == 0.0 && scaled.fract() == 0.5 {
        return scaled.ceil() / 100.0;
    }
    format!("{:.2}", x).parse().unwrap_or(x)
}

impl fmt::Display for Tgpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Tgpa {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

// ============================================================================
// ENUMS
// ============================================================================

/// Letter grade on the ten-point scale.
///
/// Variants are declared lowest first so that `Ord` follows grade quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    /// Fail, below 40.
    F,
    /// 40-49.
    C,
    /// 50-59.
    B,
    /// 60-69.
    BPlus,
    /// 70-79.
    A,
    /// 80-89.
    APlus,
    /// Outstanding, 90 and above.
    O,
}

impl Grade {
    /// Label shown to users: "O", "A+", ...
    pub fn label(self) -> &'static str {
        match self {
            Grade::O => "O",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }

    /// Grade point on the ten-point scale.
    pub fn point(self) -> u8 {
        match self {
            Grade::O => 10,
            Grade::APlus => 9,
            Grade::A => 8,
            Grade::BPlus => 7,
            Grade::B => 6,
            Grade::C => 5,
            Grade::F => 0,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Grade {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Label for a row whose marks have not been entered yet.
pub const UNSET_GRADE_LABEL: &str = "-";

/// Whether a subject graded at zero marks counts towards the average.
///
/// `Exclude` keeps the long-standing estimator behaviour: a row needs
/// marks above zero to contribute, so a 0-mark F is skipped. `Include`
/// counts every row with entered marks, letting an F pull the average down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroMarksPolicy {
    #[default]
    Exclude,
    Include,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// STRUCTS
// ============================================================================

/// One row of the subject table.
///
/// Grade and grade point are not fields: they are derived from `marks` on
/// every read, so they cannot drift out of sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    /// Free-text course name. May be empty.
    pub name: String,
    /// Credit weight. `None` until a positive value is entered.
    pub credits: Option<u32>,
    /// `None` until the marks field is first edited.
    pub marks: Option<Marks>,
}

/// Outcome of a successful aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    /// Credit-weighted average, rounded to two decimals.
    pub tgpa: Tgpa,
    /// Sum of credits over contributing rows.
    pub total_credits: u64,
    /// Sum of `grade_point * credits` over contributing rows.
    pub weighted_points: u64,
    /// How many rows contributed.
    pub contributing: usize,
}

/// A subject row as it appears in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectLine {
    pub id: SubjectId,
    pub name: String,
    pub credits: Option<u32>,
    /// Clamped marks value, if entered.
    pub marks: Option<u8>,
    /// `None` while marks are unset.
    pub grade: Option<Grade>,
    pub grade_point: u8,
    /// Whether this row contributed to the average.
    pub counted: bool,
}

/// A computed sheet: every row plus the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    pub subjects: Vec<SubjectLine>,
    pub summary: Aggregate,
    pub zero_marks: ZeroMarksPolicy,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Number of blank rows a fresh table starts with.
pub const DEFAULT_ROWS: usize = 8;

/// Configuration for an estimator session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Blank rows seeded at startup. Values below 1 are raised to 1.
    pub initial_rows: usize,
    /// How 0-mark rows are treated by the aggregator.
    pub zero_marks: ZeroMarksPolicy,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            initial_rows: DEFAULT_ROWS,
            zero_marks: ZeroMarksPolicy::Exclude,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_order_follows_points() {
        let ascending = [
            Grade::F,
            Grade::C,
            Grade::B,
            Grade::BPlus,
            Grade::A,
            Grade::APlus,
            Grade::O,
        ];
        for pair in ascending.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].point() < pair[1].point());
        }
    }

    #[test]
    fn grade_serializes_as_label() {
        let json = serde_json::to_string(&Grade::APlus).unwrap();
        assert_eq!(json, "\"A+\"");
    }

    #[test]
    fn tgpa_rounds_to_two_decimals() {
        assert_eq!(Tgpa::from_ratio(52, 6).value(), 8.67);
        assert_eq!(Tgpa::from_ratio(52, 6).to_string(), "8.67");
    }

    #[test]
    fn tgpa_rounds_on_the_stored_binary_value() {
        // 8.975 is stored just below the midpoint.
        assert_eq!(Tgpa::from_ratio(359, 40).to_string(), "8.97");
        assert_eq!(Tgpa::from_ratio(359, 40).value(), 8.97);
    }

    #[test]
    fn tgpa_exact_ties_round_up() {
        assert_eq!(Tgpa::from_ratio(65, 8).to_string(), "8.13");
        assert_eq!(Tgpa::from_ratio(77, 8).to_string(), "9.63");
        assert_eq!(Tgpa::from_ratio(1, 8).to_string(), "0.13");
    }

    #[test]
    fn tgpa_display_pads_whole_numbers() {
        assert_eq!(Tgpa::from_ratio(40, 4).to_string(), "10.00");
    }

    #[test]
    fn default_config_seeds_eight_rows_and_excludes_zero_marks() {
        let config = EstimatorConfig::default();
        assert_eq!(config.initial_rows, 8);
        assert_eq!(config.zero_marks, ZeroMarksPolicy::Exclude);
    }
}
