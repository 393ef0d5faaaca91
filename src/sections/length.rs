//! Length section - characters to add or delete to fit the length bounds.

use super::SectionResult;
use crate::policy::Policy;
use crate::report::{Deficiency, DeficiencyKind};
use crate::scan::Tally;

/// Checks the password length against the policy bounds.
///
/// Each character added to reach the minimum is assumed to be of a class not
/// seen yet (lowercase, then uppercase, then digit), so those classes are
/// marked as present on the tally.
///
/// # Returns
/// - `Some(deficiency)` if the password is too short or too long
/// - `None` if the length is within bounds
pub fn length_section(tally: &mut Tally, policy: &Policy) -> SectionResult {
    let length = tally.characters_seen;

    if length < policy.minimum_length {
        let changes = policy.minimum_length - length;
        for class in tally.missing_classes().into_iter().take(changes) {
            tally.mark(class);
        }
        return Some(Deficiency {
            kind: DeficiencyKind::TooShort { minimum: policy.minimum_length },
            changes,
        });
    }

    if length > policy.maximum_length {
        return Some(Deficiency {
            kind: DeficiencyKind::TooLong { maximum: policy.maximum_length },
            changes: length - policy.maximum_length,
        });
    }

    None
}
