//! Property-based tests for grading, coercion and the subject list.

use std::collections::HashSet;

use proptest::prelude::*;

use tgpa::aggregate::calculate;
use tgpa::grade::{grade_of, GRADE_BANDS, MAX_MARKS};
use tgpa::parse::{coerce_credits, coerce_marks};
use tgpa::subjects::SubjectList;
use tgpa::types::{Marks, SubjectId, ZeroMarksPolicy};

/// A list with one row per `(credits, marks)` pair.
fn graded_list(rows: &[(u32, u8)]) -> SubjectList {
    let mut list = SubjectList::with_rows(rows.len());
    let ids: Vec<SubjectId> = list.iter().map(|s| s.id).collect();
    for (id, (credits, marks)) in ids.into_iter().zip(rows) {
        list = list
            .update_credits(id, &credits.to_string())
            .update_marks(id, &marks.to_string());
    }
    list
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Higher marks never earn a lower grade.
    #[test]
    fn grade_is_monotonic(a in 0u8..=MAX_MARKS, b in 0u8..=MAX_MARKS) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(grade_of(lo) <= grade_of(hi));
    }

    /// Every valid mark falls in exactly one band, and that band names its grade.
    #[test]
    fn marks_land_in_one_band(marks in 0u8..=MAX_MARKS) {
        let bands: Vec<_> = GRADE_BANDS
            .iter()
            .filter(|b| (b.min..=b.max).contains(&marks))
            .collect();
        prop_assert_eq!(bands.len(), 1);
        prop_assert_eq!(bands[0].grade, grade_of(marks));
    }

    /// Coerced marks stay within 0..=100 for any input text.
    #[test]
    fn coerced_marks_are_clamped(text in ".*") {
        prop_assert!(coerce_marks(&text) <= MAX_MARKS);
    }

    /// Integer marks read back as themselves, clamped to the valid range.
    #[test]
    fn integer_marks_clamp(n in -1000i64..1000) {
        let expected = n.clamp(0, i64::from(MAX_MARKS)) as u8;
        prop_assert_eq!(coerce_marks(&n.to_string()), expected);
    }

    /// Credits are either unset or positive.
    #[test]
    fn coerced_credits_are_never_zero(text in ".*") {
        prop_assert_ne!(coerce_credits(&text), Some(0));
    }

    /// Marks keep the text exactly as typed.
    #[test]
    fn marks_keep_their_text(text in "[0-9a-z .-]{0,8}") {
        let marks = Marks::from_input(&text);
        prop_assert_eq!(marks.text(), text.as_str());
        prop_assert_eq!(marks.value(), coerce_marks(&text));
    }

    /// Adding then removing the new row restores the row count.
    #[test]
    fn add_then_remove_restores_len(rows in 1usize..20) {
        let list = SubjectList::with_rows(rows);
        let grown = list.add_subject();
        prop_assert_eq!(grown.len(), rows + 1);
        let shrunk = grown.remove_subject(grown.last().id);
        prop_assert_eq!(shrunk.len(), rows);
    }

    /// Ids stay unique and are never handed out twice.
    #[test]
    fn ids_are_never_reused(ops in prop::collection::vec((any::<bool>(), 0usize..32), 0..60)) {
        let mut list = SubjectList::with_rows(3);
        let mut seen: HashSet<SubjectId> = list.iter().map(|s| s.id).collect();

        for (add, pick) in ops {
            if add {
                list = list.add_subject();
                let id = list.last().id;
                prop_assert!(seen.insert(id), "id {} handed out twice", id);
            } else {
                let id = list.iter().nth(pick % list.len()).map(|s| s.id);
                if let Some(id) = id {
                    list = list.remove_subject(id);
                }
            }

            prop_assert!(!list.is_empty());
            let live: HashSet<SubjectId> = list.iter().map(|s| s.id).collect();
            prop_assert_eq!(live.len(), list.len());
        }
    }

    /// The average is a valid grade point and calculating twice agrees.
    #[test]
    fn tgpa_is_bounded_and_stable(
        rows in prop::collection::vec((1u32..10, 0u8..=MAX_MARKS), 1..12),
        include_zero in any::<bool>(),
    ) {
        let policy = if include_zero {
            ZeroMarksPolicy::Include
        } else {
            ZeroMarksPolicy::Exclude
        };
        let list = graded_list(&rows);

        let first = calculate(&list, policy);
        let second = calculate(&list, policy);
        prop_assert_eq!(&first, &second);

        if let Ok(summary) = first {
            let value = summary.tgpa.value();
            prop_assert!((0.0..=10.0).contains(&value), "tgpa {} out of range", value);
            prop_assert!(summary.contributing <= rows.len());
        }
    }
}
