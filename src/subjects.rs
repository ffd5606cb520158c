//! Subject list: an ordered table of rows, edited by snapshot.
//!
//! Every operation borrows the current list and returns a new one. A
//! published snapshot is never mutated, so callers can hold on to an old
//! list (for rendering, for comparison) while a newer one replaces it.

use crate::grade::grade_of;
use crate::parse::{coerce_credits, coerce_marks, parse_float_prefix, SubjectSpec};
use crate::types::{Grade, Marks, Subject, SubjectId, UNSET_GRADE_LABEL};

// ============================================================================
// SUBJECT
// ============================================================================

impl Marks {
    /// Record marks text as typed, clamping its numeric reading.
    pub fn from_input(text: &str) -> Self {
        Marks {
            text: text.to_string(),
            value: coerce_marks(text),
        }
    }

    /// Whether the typed text reads as a number above zero.
    ///
    /// Looks at the decimal reading, so `"0.5"` is positive even though it
    /// grades as 0.
    pub fn is_positive(&self) -> bool {
        parse_float_prefix(&self.text).is_some_and(|v| v > 0.0)
    }
}

impl Subject {
    /// A row with nothing entered.
    pub fn blank(id: SubjectId) -> Self {
        Subject {
            id,
            name: String::new(),
            credits: None,
            marks: None,
        }
    }

    /// Letter grade, derived from the current marks. `None` while unset.
    pub fn grade(&self) -> Option<Grade> {
        self.marks.as_ref().map(|m| grade_of(m.value))
    }

    /// Grade point, 0 while marks are unset.
    pub fn grade_point(&self) -> u8 {
        self.grade().map_or(0, Grade::point)
    }

    /// Grade label for display: "-" while marks are unset.
    pub fn grade_label(&self) -> &'static str {
        self.grade().map_or(UNSET_GRADE_LABEL, Grade::label)
    }

    /// Credits as text, empty while unset.
    pub fn credits_text(&self) -> String {
        self.credits.map(|c| c.to_string()).unwrap_or_default()
    }

    /// Marks exactly as typed, empty while unset.
    pub fn marks_text(&self) -> &str {
        self.marks.as_ref().map_or("", Marks::text)
    }

    /// Clamped marks value, 0 while unset.
    pub fn marks_value(&self) -> u8 {
        self.marks.as_ref().map_or(0, Marks::value)
    }
}

// ============================================================================
// SUBJECT LIST
// ============================================================================

/// Ordered collection of subject rows. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectList {
    rows: Vec<Subject>,
    /// Next id to hand out. Only ever increases.
    next_id: u32,
}

impl SubjectList {
    /// A list of `count` blank rows with ids 1..=count (at least one row).
    pub fn with_rows(count: usize) -> Self {
        let count = u32::try_from(count.max(1)).unwrap_or(u32::MAX);
        let rows = (1..=count).map(|i| Subject::blank(SubjectId(i))).collect();
        SubjectList {
            rows,
            next_id: count.saturating_add(1),
        }
    }

    /// Build a list from command-line specs, one row per spec.
    ///
    /// An empty slice yields a single blank row.
    pub fn from_specs(specs: &[SubjectSpec]) -> Self {
        let mut list = SubjectList::with_rows(1);
        for (i, spec) in specs.iter().enumerate() {
            if i > 0 {
                list = list.add_subject();
            }
            let id = list.last().id;
            list = list
                .update_name(id, &spec.name)
                .update_credits(id, &spec.credits)
                .update_marks(id, &spec.marks);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the list has no rows. Lists built here always keep at least one.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subject> {
        self.rows.iter()
    }

    /// Row at a display position.
    pub fn get(&self, index: usize) -> Option<&Subject> {
        self.rows.get(index)
    }

    pub fn find(&self, id: SubjectId) -> Option<&Subject> {
        self.rows.iter().find(|s| s.id == id)
    }

    /// Display position of a row.
    pub fn position(&self, id: SubjectId) -> Option<usize> {
        self.rows.iter().position(|s| s.id == id)
    }

    /// The most recently appended row.
    pub fn last(&self) -> &Subject {
        // Invariant: never empty.
        &self.rows[self.rows.len() - 1]
    }

    /// Whether a row may be removed (more than one remains).
    pub fn can_remove(&self) -> bool {
        self.rows.len() > 1
    }

    /// Replace a row's name. Any text is accepted.
    pub fn update_name(&self, id: SubjectId, text: &str) -> Self {
        self.map_row(id, |s| s.name = text.to_string())
    }

    /// Set credits from text; non-positive or unparseable text unsets them.
    pub fn update_credits(&self, id: SubjectId, text: &str) -> Self {
        self.map_row(id, |s| s.credits = coerce_credits(text))
    }

    /// Set marks from text, keeping the text for display.
    pub fn update_marks(&self, id: SubjectId, text: &str) -> Self {
        self.map_row(id, |s| s.marks = Some(Marks::from_input(text)))
    }

    /// Append a blank row with a fresh id.
    pub fn add_subject(&self) -> Self {
        let mut next = self.clone();
        next.rows.push(Subject::blank(SubjectId(next.next_id)));
        next.next_id = next.next_id.saturating_add(1);
        next
    }

    /// Remove a row, unless it is the only one left.
    pub fn remove_subject(&self, id: SubjectId) -> Self {
        let mut next = self.clone();
        if next.can_remove() {
            next.rows.retain(|s| s.id != id);
        }
        next
    }

    /// Copy the list and apply `edit` to the row with `id`, if present.
    fn map_row(&self, id: SubjectId, edit: impl FnOnce(&mut Subject)) -> Self {
        let mut next = self.clone();
        if let Some(row) = next.rows.iter_mut().find(|s| s.id == id) {
            edit(row);
        }
        next
    }
}

impl<'a> IntoIterator for &'a SubjectList {
    type Item = &'a Subject;
    type IntoIter = std::slice::Iter<'a, Subject>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
