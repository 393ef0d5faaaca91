//! Character variety section - one change per missing lowercase, uppercase or digit.

use super::SectionResult;
use crate::policy::Policy;
use crate::report::{Deficiency, DeficiencyKind};
use crate::scan::Tally;

/// Checks that each required character class was seen.
///
/// # Returns
/// - `Some(deficiency)` listing the missing classes
/// - `None` if all classes are present
pub fn character_variety_section(tally: &mut Tally, _policy: &Policy) -> SectionResult {
    let missing = tally.missing_classes();
    if missing.is_empty() {
        return None;
    }
    Some(Deficiency {
        changes: missing.len(),
        kind: DeficiencyKind::MissingClasses(missing),
    })
}
