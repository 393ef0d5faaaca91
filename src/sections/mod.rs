//! Reconciliation sections
//!
//! Each section turns one part of the scan tally into a change count. They run
//! in a fixed order because the length section may satisfy missing classes
//! before the variety section looks at them.

mod common;
mod length;
mod succession;
mod variety;

pub use common::common_password_section;
pub use length::length_section;
pub use succession::succession_section;
pub use variety::character_variety_section;

use crate::policy::Policy;
use crate::report::Deficiency;
use crate::scan::Tally;

/// Result type for section functions.
/// - `Some(deficiency)` - Section found a violation
/// - `None` - Section passed
pub type SectionResult = Option<Deficiency>;

/// Signature shared by all sections.
pub type Section = fn(&mut Tally, &Policy) -> SectionResult;

/// Sections in the order they must run.
pub const SECTIONS: [(&str, Section); 4] = [
    ("length", length_section),
    ("variety", character_variety_section),
    ("succession", succession_section),
    ("common", common_password_section),
];
