//! Password change counter
//!
//! This library estimates how many single-character edits a password needs
//! before it satisfies a fixed composition policy:
//!
//! - length between a minimum and a maximum
//! - at least one lowercase letter, uppercase letter and digit
//! - no run of repeated identical characters
//! - no known common password as a substring
//!
//! The count is a heuristic upper bound rather than a true edit distance:
//! each deficiency is fixed on its own, and overlapping common-password
//! matches are all counted.
//!
//! # Features
//!
//! - `async` (default): Enables channel-based evaluation with cancellation support
//! - `tracing` (default): Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_COMMON_PASSWORDS_PATH`: Custom path to the common password index
//!   (default: the index embedded in the crate)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_changes::{count_changes, get_common_passwords, init_common_passwords, Policy};
//! use secrecy::SecretString;
//!
//! // Initialize the common password index (call once at startup)
//! init_common_passwords().expect("Failed to load common passwords");
//! let index = get_common_passwords().expect("index initialized");
//!
//! let password = SecretString::new("ab1234567AB".to_string().into());
//! let changes = count_changes(&password, &index, &Policy::default());
//!
//! println!("Changes needed: {}", changes);
//! ```

// Internal modules
mod common_passwords;
mod evaluator;
mod policy;
mod report;
mod scan;
mod sections;
mod selftest;

// Public API
pub use common_passwords::{
    common_passwords_path, get_common_passwords, init_common_passwords,
    init_common_passwords_from_path, CommonPasswordIndex, IndexError, COMMON_PASSWORDS_PATH_ENV,
    INDEX_FORMAT_VERSION,
};
pub use evaluator::{count_changes, evaluate_changes};
pub use policy::{Policy, PolicyError, MAXIMUM_LENGTH, MINIMUM_LENGTH, SUCCESSION_LENGTH};
pub use report::{ChangeReport, Deficiency, DeficiencyKind};
pub use scan::{scan, CharClass, Tally};
pub use selftest::{
    builtin_cases, load_cases, run_cases, CaseOutcome, SelfTestError, SelfTestReport, TestCase,
};

#[cfg(feature = "async")]
pub use evaluator::{evaluate_changes_tx, EVALUATION_DEBOUNCE};
