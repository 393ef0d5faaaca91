//! Self-test harness
//!
//! Feeds a table of `(input, expected changes)` pairs through the change
//! counter and reports which ones match. The built-in table covers every
//! kind of deficiency the counter knows about.

use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::common_passwords::CommonPasswordIndex;
use crate::evaluator::count_changes;
use crate::policy::Policy;

#[derive(Error, Debug)]
pub enum SelfTestError {
    #[error("Test case file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read test case file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse test cases: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Test case file contains no cases")]
    NoCases,
}

/// A password and the number of changes it should need.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    pub input: String,
    pub expected: usize,
}

impl TestCase {
    pub fn new(input: &str, expected: usize) -> Self {
        Self {
            input: input.to_string(),
            expected,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseFile {
    cases: Vec<TestCase>,
}

/// The fixed table run by `pwd-changes selftest`, against the embedded index
/// and the default policy.
pub fn builtin_cases() -> Vec<TestCase> {
    [
        // Secure
        ("1377C0d3", 0),
        ("1243586aB", 0),
        ("aB123ccdde", 0),
        ("11224433556677889900112aB", 0),
        // Too short
        ("", 7),
        ("z", 6),
        ("aA1", 4),
        // Too long
        ("1122443355667788990011aB22", 1),
        ("1122443355667788990011aB2244336677", 9),
        // Single class only
        ("abcabcabc", 2),
        ("ABCABCABC", 2),
        ("1122554433", 2),
        // One class missing
        ("ABC321GHI", 1),
        ("abc321ghi", 1),
        ("abcDEFghi", 1),
        // Successive characters
        ("123AAAa456", 1),
        ("123AAAAAa456", 1),
        ("123AAAAAAa456", 2),
        // Common passwords
        ("ab1234AB", 1),
        ("ab1234567AB", 4),
        ("q1w2e3r4t5y6A", 1),
        // Too short, digits only
        ("11224", 2),
        ("112244", 2),
        // Too short with successive characters
        ("11222", 3),
        ("112223", 3),
        // Too long, violations past the maximum are ignored
        ("11224433556677889900aB112244336666", 9),
        ("11224433556677889900aB11224433summer", 11),
        ("1122443355667788990011224433556677aB", 13),
        // Missing classes with successive characters
        ("123AAA456", 2),
        ("132444567", 3),
        // Several common passwords, overlapping ones included
        ("1Ahellosummer", 2),
        ("aB1233212345", 3),
        ("Aabc123123", 2),
        ("Aabc123123123", 3),
    ]
    .into_iter()
    .map(|(input, expected)| TestCase::new(input, expected))
    .collect()
}

/// Loads cases from a TOML file.
///
/// ```toml
/// [[cases]]
/// input = "aA1"
/// expected = 4
/// ```
pub fn load_cases<P: AsRef<Path>>(path: P) -> Result<Vec<TestCase>, SelfTestError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SelfTestError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let file: CaseFile = toml::from_str(&content)?;
    if file.cases.is_empty() {
        return Err(SelfTestError::NoCases);
    }
    Ok(file.cases)
}

/// Outcome of a single case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    pub case: TestCase,
    pub actual: usize,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.case.expected == self.actual
    }
}

/// Outcomes of a whole run, in case order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfTestReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl SelfTestReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(CaseOutcome::passed)
    }
}

/// Runs every case through the change counter.
pub fn run_cases(cases: &[TestCase], index: &CommonPasswordIndex, policy: &Policy) -> SelfTestReport {
    let outcomes = cases
        .iter()
        .map(|case| {
            let password = SecretString::new(case.input.clone().into());
            let actual = count_changes(&password, index, policy);

            #[cfg(feature = "tracing")]
            {
                if actual != case.expected {
                    tracing::warn!(
                        "Self-test mismatch for {:?}: expected {}, got {}",
                        case.input,
                        case.expected,
                        actual
                    );
                }
            }

            CaseOutcome {
                case: case.clone(),
                actual,
            }
        })
        .collect();

    SelfTestReport { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_cases_all_pass() {
        let index = CommonPasswordIndex::builtin().unwrap();
        let report = run_cases(&builtin_cases(), &index, &Policy::default());

        let failures: Vec<_> = report.outcomes.iter().filter(|o| !o.passed()).collect();
        assert!(failures.is_empty(), "failing cases: {:?}", failures);
        assert_eq!(report.passed(), report.total());
        assert_eq!(report.total(), 34);
    }

    #[test]
    fn test_report_detects_mismatch() {
        let index = CommonPasswordIndex::builtin().unwrap();
        let cases = [TestCase::new("aA1", 4), TestCase::new("aA1", 0)];
        let report = run_cases(&cases, &index, &Policy::default());

        assert_eq!(report.passed(), 1);
        assert!(!report.all_passed());
        assert_eq!(report.outcomes[1].actual, 4);
    }

    #[test]
    fn test_empty_run_passes() {
        let report = run_cases(&[], &CommonPasswordIndex::default(), &Policy::default());
        assert!(report.all_passed());
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_load_cases() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(
            temp_file,
            "[[cases]]\ninput = \"z\"\nexpected = 6\n\n[[cases]]\ninput = \"\"\nexpected = 7\n"
        )
        .expect("Failed to write");

        let cases = load_cases(temp_file.path()).unwrap();
        assert_eq!(cases, vec![TestCase::new("z", 6), TestCase::new("", 7)]);
    }

    #[test]
    fn test_load_cases_empty() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "cases = []\n").expect("Failed to write");

        assert!(matches!(load_cases(temp_file.path()), Err(SelfTestError::NoCases)));
    }

    #[test]
    fn test_load_cases_missing_file() {
        assert!(matches!(
            load_cases("/nonexistent/cases.toml"),
            Err(SelfTestError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_load_cases_rejects_negative_expectation() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "[[cases]]\ninput = \"z\"\nexpected = -1\n").expect("Failed to write");

        assert!(matches!(load_cases(temp_file.path()), Err(SelfTestError::Parse(_))));
    }
}
