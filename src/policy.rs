//! Policy configuration - the length and succession limits a password must respect.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Shortest compliant password, in characters.
pub const MINIMUM_LENGTH: usize = 7;
/// Longest compliant password, in characters.
pub const MAXIMUM_LENGTH: usize = 25;
/// Number of identical consecutive characters that counts as one violation.
pub const SUCCESSION_LENGTH: usize = 3;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Policy file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read policy file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse policy: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("minimum_length ({minimum}) is greater than maximum_length ({maximum})")]
    InvertedLengths { minimum: usize, maximum: usize },
    #[error("succession_length must be at least 2, got {0}")]
    SuccessionTooShort(usize),
}

/// Limits applied by the change counter.
///
/// Every field is optional in a policy file; missing keys keep their default.
///
/// ```toml
/// minimum_length = 7
/// maximum_length = 25
/// succession_length = 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    pub minimum_length: usize,
    pub maximum_length: usize,
    pub succession_length: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            minimum_length: MINIMUM_LENGTH,
            maximum_length: MAXIMUM_LENGTH,
            succession_length: SUCCESSION_LENGTH,
        }
    }
}

impl Policy {
    /// Parses and validates a policy from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, PolicyError> {
        let policy: Policy = toml::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Loads and validates a policy file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PolicyError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let policy = Self::from_toml_str(&content)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Policy loaded from {:?}: {:?}", path, policy);

        Ok(policy)
    }

    /// Rejects limits the scan cannot honour.
    ///
    /// A succession length of 1 would flag every character, and a
    /// minimum above the maximum leaves no compliant length at all.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.minimum_length > self.maximum_length {
            return Err(PolicyError::InvertedLengths {
                minimum: self.minimum_length,
                maximum: self.maximum_length,
            });
        }
        if self.succession_length < 2 {
            return Err(PolicyError::SuccessionTooShort(self.succession_length));
        }
        Ok(())
    }
}
