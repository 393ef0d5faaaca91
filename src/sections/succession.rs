//! Succession section - one change per run of identical characters.

use super::SectionResult;
use crate::policy::Policy;
use crate::report::{Deficiency, DeficiencyKind};
use crate::scan::Tally;

pub fn succession_section(tally: &mut Tally, policy: &Policy) -> SectionResult {
    if tally.successive_runs == 0 {
        return None;
    }
    Some(Deficiency {
        kind: DeficiencyKind::SuccessiveRuns {
            succession_length: policy.succession_length,
        },
        changes: tally.successive_runs,
    })
}
