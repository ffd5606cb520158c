//! tgpa: estimate a term grade point average from subject credits and marks.

pub mod aggregate;
pub mod estimator;
pub mod grade;
pub mod parse;
pub mod report;
pub mod subjects;
pub mod tui;
pub mod types;
