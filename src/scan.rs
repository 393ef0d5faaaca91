//! Single left-to-right pass over a password.
//!
//! Only the first `maximum_length` characters are inspected; anything past
//! that point is counted toward the length and otherwise ignored, since it
//! will be deleted by the length fix anyway.

use std::collections::VecDeque;

use crate::common_passwords::CommonPasswordIndex;
use crate::policy::Policy;

/// Character classes a compliant password must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
}

impl CharClass {
    /// Classes in the order added characters are assumed to fill them.
    pub const ALL: [CharClass; 3] = [CharClass::Lowercase, CharClass::Uppercase, CharClass::Digit];

    /// Classifies a character. Anything else (symbols, whitespace) has no class.
    pub fn of(c: char) -> Option<Self> {
        if c.is_lowercase() {
            Some(CharClass::Lowercase)
        } else if c.is_uppercase() {
            Some(CharClass::Uppercase)
        } else if c.is_numeric() {
            Some(CharClass::Digit)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharClass::Lowercase => "lowercase",
            CharClass::Uppercase => "uppercase",
            CharClass::Digit => "digit",
        }
    }
}

/// What the scan found. Sections consume and amend it during reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    /// Every character of the password, including those past the maximum.
    pub characters_seen: usize,
    pub(crate) classes_seen: [bool; 3],
    /// Completed runs of `succession_length` identical characters.
    pub successive_runs: usize,
    /// Common passwords ending at each position, in scan order. Overlapping
    /// matches are all kept.
    pub common_matches: Vec<String>,
}

impl Tally {
    pub fn has(&self, class: CharClass) -> bool {
        self.classes_seen[class as usize]
    }

    pub fn mark(&mut self, class: CharClass) {
        self.classes_seen[class as usize] = true;
    }

    /// Classes not seen yet, in fill order.
    pub fn missing_classes(&self) -> Vec<CharClass> {
        CharClass::ALL
            .into_iter()
            .filter(|class| !self.has(*class))
            .collect()
    }
}

/// Tracks the current run of identical characters.
///
/// A completed run resets to length 1 with nothing tracked, so the next
/// character always opens a fresh run: six identical characters are two
/// runs of three, not four overlapping ones.
#[derive(Debug, Default)]
struct SuccessionTracker {
    length: usize,
    tracked: Option<char>,
}

impl SuccessionTracker {
    /// Feeds one character and reports whether it completed a run.
    fn push(&mut self, c: char, succession_length: usize) -> bool {
        self.length += 1;
        if self.tracked == Some(c) {
            if self.length == succession_length {
                self.length = 1;
                self.tracked = None;
                return true;
            }
        } else {
            self.length = 1;
            self.tracked = Some(c);
        }
        false
    }
}

/// The most recent characters, bounded by the longest common password.
#[derive(Debug)]
struct TrailingWindow {
    chars: VecDeque<char>,
    capacity: usize,
}

impl TrailingWindow {
    fn new(capacity: usize) -> Self {
        Self {
            chars: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    fn push(&mut self, c: char) {
        self.chars.push_back(c);
        if self.chars.len() > self.capacity {
            self.chars.pop_front();
        }
    }

    /// The last `length` characters, if that many have been seen.
    fn tail(&self, length: usize) -> Option<String> {
        let available = self.chars.len();
        (available >= length).then(|| self.chars.iter().skip(available - length).collect())
    }
}

/// Runs the single pass over `password`.
pub fn scan(password: &str, index: &CommonPasswordIndex, policy: &Policy) -> Tally {
    let mut tally = Tally::default();
    let mut succession = SuccessionTracker::default();
    let mut window = TrailingWindow::new(index.longest());

    for c in password.chars() {
        tally.characters_seen += 1;
        if tally.characters_seen > policy.maximum_length {
            continue;
        }

        if let Some(class) = CharClass::of(c) {
            tally.mark(class);
        }

        if succession.push(c, policy.succession_length) {
            tally.successive_runs += 1;
        }

        window.push(c);
        for (length, passwords) in index.lengths_ending_with(c) {
            if let Some(tail) = window.tail(length) {
                if passwords.contains(&tail) {
                    tally.common_matches.push(tail);
                }
            }
        }
    }

    tally
}
