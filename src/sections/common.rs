//! Common password section - one change per common password found.

use super::SectionResult;
use crate::policy::Policy;
use crate::report::{Deficiency, DeficiencyKind};
use crate::scan::Tally;

/// Each match is assumed to need its own edit, even when matches overlap
/// and a single edit would break several of them.
pub fn common_password_section(tally: &mut Tally, _policy: &Policy) -> SectionResult {
    if tally.common_matches.is_empty() {
        return None;
    }
    Some(Deficiency {
        changes: tally.common_matches.len(),
        kind: DeficiencyKind::CommonPasswords(tally.common_matches.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_section_counts_overlapping_matches() {
        let mut tally = Tally {
            common_matches: vec!["1234".into(), "12345".into()],
            ..Tally::default()
        };
        let result = common_password_section(&mut tally, &Policy::default());
        assert_eq!(
            result,
            Some(Deficiency {
                kind: DeficiencyKind::CommonPasswords(vec!["1234".into(), "12345".into()]),
                changes: 2,
            })
        );
    }

    #[test]
    fn test_common_section_no_matches() {
        assert_eq!(common_password_section(&mut Tally::default(), &Policy::default()), None);
    }
}
