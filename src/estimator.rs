//! Estimator session: the one piece of mutable state.
//!
//! Holds the current subject snapshot, the result overlay and the
//! configuration. Each edit swaps in a whole new snapshot, so a reader never
//! sees a half-applied change.

use tracing::{debug, info};

use crate::aggregate::{self, ResultOverlay, TgpaError};
use crate::subjects::SubjectList;
use crate::types::{Aggregate, EstimatorConfig, SubjectId};

#[derive(Debug, Clone)]
pub struct Estimator {
    subjects: SubjectList,
    overlay: ResultOverlay,
    config: EstimatorConfig,
}

impl Estimator {
    /// Start a session with `config.initial_rows` blank rows.
    pub fn new(config: EstimatorConfig) -> Self {
        Estimator {
            subjects: SubjectList::with_rows(config.initial_rows),
            overlay: ResultOverlay::Hidden,
            config,
        }
    }

    pub fn subjects(&self) -> &SubjectList {
        &self.subjects
    }

    pub fn overlay(&self) -> ResultOverlay {
        self.overlay
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn update_name(&mut self, id: SubjectId, text: &str) {
        self.subjects = self.subjects.update_name(id, text);
        debug!(%id, "subject name updated");
    }

    pub fn update_credits(&mut self, id: SubjectId, text: &str) {
        self.subjects = self.subjects.update_credits(id, text);
        debug!(
            %id,
            input = text,
            credits = ?self.subjects.find(id).and_then(|s| s.credits),
            "credits updated"
        );
    }

    pub fn update_marks(&mut self, id: SubjectId, text: &str) {
        self.subjects = self.subjects.update_marks(id, text);
        if let Some(subject) = self.subjects.find(id) {
            debug!(
                %id,
                input = text,
                marks = subject.marks_value(),
                grade = subject.grade_label(),
                "marks updated"
            );
        }
    }

    /// Append a blank row and return its id.
    pub fn add_subject(&mut self) -> SubjectId {
        self.subjects = self.subjects.add_subject();
        let id = self.subjects.last().id;
        debug!(%id, rows = self.subjects.len(), "subject added");
        id
    }

    /// Remove a row. Returns false when it was the last one (or unknown).
    pub fn remove_subject(&mut self, id: SubjectId) -> bool {
        let before = self.subjects.len();
        self.subjects = self.subjects.remove_subject(id);
        let removed = self.subjects.len() < before;
        if removed {
            debug!(%id, rows = self.subjects.len(), "subject removed");
        } else {
            debug!(%id, rows = before, "removal ignored");
        }
        removed
    }

    /// Aggregate the current rows and show the result.
    ///
    /// On failure the overlay is left as it was.
    pub fn calculate(&mut self) -> Result<Aggregate, TgpaError> {
        match aggregate::calculate(&self.subjects, self.config.zero_marks) {
            Ok(result) => {
                self.overlay = self.overlay.show(result.tgpa);
                info!(
                    tgpa = %result.tgpa,
                    credits = result.total_credits,
                    subjects = result.contributing,
                    "tgpa calculated"
                );
                Ok(result)
            }
            Err(e) => {
                debug!(error = %e, "calculation rejected");
                Err(e)
            }
        }
    }

    /// Hide the result overlay.
    pub fn dismiss(&mut self) {
        self.overlay = self.overlay.dismiss();
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Estimator::new(EstimatorConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
