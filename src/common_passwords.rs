//! Common-password index management module
//!
//! Handles loading, indexing and caching the list of known common passwords.
//! Entries are grouped by their last character and then by their length, so
//! the scan only has to look at the passwords that could end at the current
//! character.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Environment variable overriding the index location.
pub const COMMON_PASSWORDS_PATH_ENV: &str = "PWD_COMMON_PASSWORDS_PATH";

/// Index file format version understood by this crate.
pub const INDEX_FORMAT_VERSION: u32 = 1;

const BUILTIN_INDEX: &str = include_str!("../assets/common-passwords.toml");

static COMMON_PASSWORDS: RwLock<Option<Arc<CommonPasswordIndex>>> = RwLock::new(None);

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Common password file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read common password file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse common password index: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Common password index is empty")]
    EmptyIndex,
    #[error("Unsupported common password index version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// On-disk representation of the index.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IndexFile {
    version: u32,
    passwords: Vec<String>,
}

/// Known common passwords keyed by last character, then by length in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonPasswordIndex {
    by_last_char: HashMap<char, BTreeMap<usize, HashSet<String>>>,
    longest: usize,
    count: usize,
}

impl CommonPasswordIndex {
    /// Builds an index from a list of passwords.
    ///
    /// Surrounding whitespace is trimmed and blank entries are skipped.
    /// Matching is case-sensitive, so entries keep their case.
    pub fn from_passwords<I, S>(passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for password in passwords {
            index.insert(password.as_ref().trim());
        }
        index
    }

    /// Builds an index from a line-delimited list, one password per line.
    pub fn from_lines(content: &str) -> Self {
        Self::from_passwords(content.lines())
    }

    /// Parses the versioned TOML format.
    ///
    /// ```toml
    /// version = 1
    /// passwords = ["1234", "hello"]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, IndexError> {
        let file: IndexFile = toml::from_str(content)?;
        if file.version != INDEX_FORMAT_VERSION {
            return Err(IndexError::UnsupportedVersion {
                found: file.version,
                expected: INDEX_FORMAT_VERSION,
            });
        }
        let index = Self::from_passwords(&file.passwords);
        if index.is_empty() {
            return Err(IndexError::EmptyIndex);
        }
        Ok(index)
    }

    /// Loads an index file. Files ending in `.txt` are read as plain
    /// line-delimited lists, anything else as the versioned TOML format.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, IndexError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Common password index FAILED: FileNotFound {:?}", path);
            return Err(IndexError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        let is_plain_list = path.extension().is_some_and(|ext| ext == "txt");
        let index = if is_plain_list {
            Self::from_lines(&content)
        } else {
            Self::from_toml_str(&content)?
        };

        if index.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Common password index FAILED: Empty file {:?}", path);
            return Err(IndexError::EmptyIndex);
        }

        Ok(index)
    }

    /// The index embedded in the crate.
    pub fn builtin() -> Result<Self, IndexError> {
        Self::from_toml_str(BUILTIN_INDEX)
    }

    fn insert(&mut self, password: &str) {
        let Some(last) = password.chars().last() else {
            return;
        };
        let length = password.chars().count();
        let inserted = self
            .by_last_char
            .entry(last)
            .or_default()
            .entry(length)
            .or_default()
            .insert(password.to_string());
        if inserted {
            self.count += 1;
            self.longest = self.longest.max(length);
        }
    }

    /// Length of the longest indexed password, 0 when empty.
    pub fn longest(&self) -> usize {
        self.longest
    }

    /// Number of distinct indexed passwords.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The `(length, passwords)` groups whose entries end with `last`,
    /// shortest first.
    pub fn lengths_ending_with(
        &self,
        last: char,
    ) -> impl Iterator<Item = (usize, &HashSet<String>)> + '_ {
        self.by_last_char
            .get(&last)
            .into_iter()
            .flat_map(|by_length| by_length.iter().map(|(length, set)| (*length, set)))
    }

    /// Checks whether `password` is an indexed entry (exact match).
    pub fn contains(&self, password: &str) -> bool {
        let Some(last) = password.chars().last() else {
            return false;
        };
        let length = password.chars().count();
        self.by_last_char
            .get(&last)
            .and_then(|by_length| by_length.get(&length))
            .is_some_and(|set| set.contains(password))
    }
}

/// Returns the index file path from `PWD_COMMON_PASSWORDS_PATH`, if set.
///
/// When unset the embedded index is used.
pub fn common_passwords_path() -> Option<PathBuf> {
    std::env::var_os(COMMON_PASSWORDS_PATH_ENV).map(PathBuf::from)
}

/// Initializes the process-wide index.
///
/// Loads the file named by `PWD_COMMON_PASSWORDS_PATH` when set, otherwise the
/// embedded index. Returns the number of indexed passwords.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read or parsed
/// - Index is empty
pub fn init_common_passwords() -> Result<usize, IndexError> {
    match common_passwords_path() {
        Some(path) => init_common_passwords_from_path(path),
        None => install(CommonPasswordIndex::builtin, "embedded index"),
    }
}

/// Initializes the process-wide index from a specific file path.
///
/// Idempotent: once an index is installed later calls return its size
/// without reading anything.
pub fn init_common_passwords_from_path<P: AsRef<Path>>(path: P) -> Result<usize, IndexError> {
    let path = path.as_ref();
    install(
        || CommonPasswordIndex::load_from_path(path),
        &path.display().to_string(),
    )
}

fn install<F>(load: F, _source: &str) -> Result<usize, IndexError>
where
    F: FnOnce() -> Result<CommonPasswordIndex, IndexError>,
{
    {
        let guard = COMMON_PASSWORDS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = guard.as_ref() {
            return Ok(index.len());
        }
    }

    let mut guard = COMMON_PASSWORDS.write().unwrap_or_else(PoisonError::into_inner);
    // Another thread may have won the race while we waited for the lock.
    if let Some(index) = guard.as_ref() {
        return Ok(index.len());
    }

    let index = load()?;
    let count = index.len();
    *guard = Some(Arc::new(index));

    #[cfg(feature = "tracing")]
    tracing::info!("Common password index initialized: {} passwords from {}", count, _source);

    Ok(count)
}

/// Returns the shared index.
///
/// Returns `None` if `init_common_passwords()` has not been called.
pub fn get_common_passwords() -> Option<Arc<CommonPasswordIndex>> {
    let guard = COMMON_PASSWORDS.read().unwrap_or_else(PoisonError::into_inner);
    guard.clone()
}

/// Resets the shared index for testing purposes.
#[cfg(test)]
pub fn reset_common_passwords_for_testing() {
    let mut guard = COMMON_PASSWORDS.write().unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}
