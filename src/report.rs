//! Result types returned by the change counter.

use std::fmt;

use crate::scan::CharClass;

/// Kind of policy violation and the details needed to describe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeficiencyKind {
    /// Characters must be appended to reach the minimum length.
    TooShort { minimum: usize },
    /// Characters must be deleted to get down to the maximum length.
    TooLong { maximum: usize },
    /// Classes still missing after any characters added for length.
    MissingClasses(Vec<CharClass>),
    /// Runs of identical characters.
    SuccessiveRuns { succession_length: usize },
    /// Common passwords found as substrings, overlapping ones included.
    CommonPasswords(Vec<String>),
}

/// One violation and the number of changes assumed to fix it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deficiency {
    pub kind: DeficiencyKind,
    pub changes: usize,
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DeficiencyKind::TooShort { minimum } => write!(
                f,
                "Password must be at least {} characters ({} to add)",
                minimum, self.changes
            ),
            DeficiencyKind::TooLong { maximum } => write!(
                f,
                "Password must be at most {} characters ({} to delete)",
                maximum, self.changes
            ),
            DeficiencyKind::MissingClasses(classes) => {
                let names: Vec<_> = classes.iter().map(|c| c.name()).collect();
                write!(f, "Missing: {}", names.join(", "))
            }
            DeficiencyKind::SuccessiveRuns { succession_length } => write!(
                f,
                "Password contains {} run(s) of {} identical characters",
                self.changes, succession_length
            ),
            DeficiencyKind::CommonPasswords(matches) => {
                write!(f, "Password contains common passwords: {}", matches.join(", "))
            }
        }
    }
}

/// Outcome of a change count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    /// Total number of single-character edits assumed necessary.
    pub changes: usize,
    pub deficiencies: Vec<Deficiency>,
}

impl ChangeReport {
    pub fn is_compliant(&self) -> bool {
        self.changes == 0
    }

    /// Human-readable reasons, one per deficiency.
    pub fn reasons(&self) -> Vec<String> {
        self.deficiencies.iter().map(ToString::to_string).collect()
    }
}
