//! Report formatting for computed sheets.
//!
//! Pure functions: (SheetReport, OutputFormat) to String.
//! No I/O, no side effects.

use crate::aggregate::contributes;
use crate::grade::GRADE_BANDS;
use crate::subjects::SubjectList;
use crate::types::{
    Aggregate, OutputFormat, SheetReport, SubjectLine, ZeroMarksPolicy, UNSET_GRADE_LABEL,
};

/// Assemble a report from a snapshot and its aggregate.
pub fn build_report(
    subjects: &SubjectList,
    summary: Aggregate,
    policy: ZeroMarksPolicy,
) -> SheetReport {
    let lines = subjects
        .iter()
        .map(|s| SubjectLine {
            id: s.id,
            name: s.name.clone(),
            credits: s.credits,
            marks: s.marks.as_ref().map(|m| m.value()),
            grade: s.grade(),
            grade_point: s.grade_point(),
            counted: contributes(s, policy),
        })
        .collect();

    SheetReport {
        subjects: lines,
        summary,
        zero_marks: policy,
    }
}

/// Format a sheet report for output.
///
/// Pure function: takes data, returns formatted string.
pub fn format_report(report: &SheetReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(report),
        OutputFormat::Json => format_json(report),
    }
}

/// The grading reference table, one band per line.
pub fn format_grade_table() -> String {
    let mut out = String::new();
    out.push_str("=== Grading System Reference ===\n");
    out.push_str("Grade  GP  Marks\n");
    for band in &GRADE_BANDS {
        out.push_str(&format!(
            "{:<5}  {:>2}  {}\n",
            band.grade.label(),
            band.grade.point(),
            band.range_label()
        ));
    }
    out
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(report: &SheetReport) -> String {
    let mut out = String::new();

    out.push_str("=== Subjects ===\n");
    out.push_str(&format!(
        "{:>3}  {:<24} {:>7} {:>5}  {:<5} {:>2}\n",
        "#", "Course", "Credits", "Marks", "Grade", "GP"
    ));
    for (i, line) in report.subjects.iter().enumerate() {
        let name = if line.name.is_empty() { "-" } else { line.name.as_str() };
        let credits = line.credits.map(|c| c.to_string()).unwrap_or_default();
        let marks = line.marks.map(|m| m.to_string()).unwrap_or_default();
        let grade = line.grade.map_or(UNSET_GRADE_LABEL, |g| g.label());
        let note = if line.counted { "" } else { "  (not counted)" };
        out.push_str(&format!(
            "{:>3}  {:<24} {:>7} {:>5}  {:<5} {:>2}{}\n",
            i + 1,
            name,
            credits,
            marks,
            grade,
            line.grade_point,
            note
        ));
    }
    out.push('\n');

    out.push_str(&format_summary(report));

    out
}

fn format_summary(report: &SheetReport) -> String {
    let summary = &report.summary;

    let mut out = String::new();
    out.push_str("=== Summary ===\n");
    out.push_str(&format!(
        "Subjects counted:   {} of {}\n",
        summary.contributing,
        report.subjects.len()
    ));
    out.push_str(&format!("Total credits:      {}\n", summary.total_credits));
    out.push_str(&format!("Weighted points:    {}\n", summary.weighted_points));
    if report.zero_marks == ZeroMarksPolicy::Include {
        out.push_str("Zero marks:         counted\n");
    }
    out.push_str(&format!("TGPA:               {}\n", summary.tgpa));

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(report: &SheetReport) -> String {
    // serde_json::to_string_pretty for readable output
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        // This should never happen with our types, but fail explicitly
        panic!("Failed to serialize report to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================
