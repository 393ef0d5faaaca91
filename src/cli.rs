//! Command-line interface for the change counter.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Print the changes needed for one or more passwords |
//! | `selftest` | Run a table of known cases and report pass/fail |

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use pwd_changes::{
    builtin_cases, evaluate_changes, get_common_passwords, init_common_passwords,
    init_common_passwords_from_path, load_cases, run_cases, CommonPasswordIndex, Policy,
};

/// Exit codes returned by the binary.
pub mod exit_codes {
    /// Every password is compliant, or every self-test case passed
    pub const SUCCESS: i32 = 0;
    /// Some password needs changes, or some self-test case failed
    pub const FAILURES: i32 = 1;
    /// Configuration or runtime error
    pub const ERROR: i32 = 2;
}

/// Count the edits needed to make passwords satisfy the password policy
#[derive(Parser, Debug)]
#[command(name = "pwd-changes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Common password index (TOML, or .txt with one password per line).
    /// Defaults to $PWD_COMMON_PASSWORDS_PATH, then the embedded index
    #[arg(short, long, global = true, value_name = "FILE")]
    pub index: Option<PathBuf>,

    /// Policy file overriding the default limits
    #[arg(short, long, global = true, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the number of changes each password needs
    Check(CheckArgs),

    /// Run the self-test table and report pass/fail
    Selftest(SelftestArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Passwords to check. Read one per line from stdin when omitted
    pub passwords: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SelftestArgs {
    /// TOML file with [[cases]] entries replacing the built-in table
    #[arg(long, value_name = "FILE")]
    pub cases: Option<PathBuf>,
}

impl Cli {
    /// Runs the selected command and returns the process exit code.
    pub fn execute(self) -> Result<i32> {
        let policy = self.load_policy()?;
        let index = self.load_index()?;

        match self.command {
            Commands::Check(args) => check(args, &index, &policy),
            Commands::Selftest(args) => selftest(args, &index, &policy),
        }
    }

    fn load_policy(&self) -> Result<Policy> {
        match &self.policy {
            Some(path) => Policy::load_from_file(path)
                .with_context(|| format!("Failed to load policy from {}", path.display())),
            None => Ok(Policy::default()),
        }
    }

    fn load_index(&self) -> Result<Arc<CommonPasswordIndex>> {
        let count = match &self.index {
            Some(path) => init_common_passwords_from_path(path)
                .with_context(|| format!("Failed to load common passwords from {}", path.display()))?,
            None => init_common_passwords().context("Failed to load common passwords")?,
        };
        tracing::debug!("Using {} common passwords", count);
        get_common_passwords().context("Common password index was not initialized")
    }
}

fn check(args: CheckArgs, index: &CommonPasswordIndex, policy: &Policy) -> Result<i32> {
    let passwords = if args.passwords.is_empty() {
        std::io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read passwords from stdin")?
    } else {
        args.passwords
    };

    let mut exit_code = exit_codes::SUCCESS;
    for password in passwords {
        let report = evaluate_changes(&SecretString::new(password.into()), index, policy);
        println!("{}", report.changes);
        for reason in report.reasons() {
            println!("  - {}", reason);
        }
        if !report.is_compliant() {
            exit_code = exit_codes::FAILURES;
        }
    }
    Ok(exit_code)
}

fn selftest(args: SelftestArgs, index: &CommonPasswordIndex, policy: &Policy) -> Result<i32> {
    let cases = match &args.cases {
        Some(path) => load_cases(path)
            .with_context(|| format!("Failed to load test cases from {}", path.display()))?,
        None => builtin_cases(),
    };

    let report = run_cases(&cases, index, policy);
    for outcome in &report.outcomes {
        println!(
            "Input: {:?}  -  Expected: {}  -  Output: {}  -  Pass: {}",
            outcome.case.input,
            outcome.case.expected,
            outcome.actual,
            outcome.passed()
        );
    }
    println!("Test Results: {}/{} passed", report.passed(), report.total());

    Ok(if report.all_passed() {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURES
    })
}
