//! Key names and line terminators

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Marker that turns an entry into a disabled (commented) entry.
pub const COMMENT_MARKER: char = '#';

/// A key as it appears left of `=` in an env file.
///
/// The key is always matched as a literal line prefix, so characters such as
/// `.` or `+` carry no special meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyName(String);

impl KeyName {
    /// Validate and wrap a key.
    ///
    /// Rejects empty keys, keys containing `=` or line breaks, and keys
    /// starting with the comment marker.
    pub fn new(key: &str) -> Result<Self, DomainError> {
        let reason = if key.is_empty() {
            Some("key is empty")
        } else if key.contains('=') {
            Some("key contains '='")
        } else if key.contains(['\n', '\r']) {
            Some("key contains a line break")
        } else if key.starts_with(COMMENT_MARKER) {
            Some("key starts with the comment marker")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidKey {
                key: key.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(Self(key.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `KEY=`, the prefix of an active entry.
    pub fn active_prefix(&self) -> String {
        format!("{}=", self.0)
    }

    /// `#KEY=`, the prefix of a disabled entry.
    pub fn disabled_prefix(&self) -> String {
        format!("{}{}=", COMMENT_MARKER, self.0)
    }

    /// Render a full `KEY=value` assignment.
    pub fn assignment(&self, value: &str) -> String {
        format!("{}={}", self.0, value)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ensure a value fits on a single line.
pub fn validate_value(key: &KeyName, value: &str) -> Result<(), DomainError> {
    if value.contains(['\n', '\r']) {
        return Err(DomainError::InvalidValue {
            key: key.to_string(),
            reason: "value contains a line break".to_string(),
        });
    }
    Ok(())
}

/// Line terminator used when appending new entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Terminator of the host platform.
    #[default]
    Native,
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_plain_key_when_validating_then_accepts() {
        let key = KeyName::new("APP_NAME").unwrap();
        assert_eq!(key.as_str(), "APP_NAME");
        assert_eq!(key.active_prefix(), "APP_NAME=");
        assert_eq!(key.disabled_prefix(), "#APP_NAME=");
        assert_eq!(key.assignment("x"), "APP_NAME=x");
    }

    #[test]
    fn given_key_with_metacharacters_when_validating_then_accepts_literally() {
        let key = KeyName::new("A.B+C(1)").unwrap();
        assert_eq!(key.active_prefix(), "A.B+C(1)=");
    }

    #[test]
    fn given_malformed_keys_when_validating_then_rejects() {
        for bad in ["", "A=B", "A\nB", "A\rB", "#A"] {
            let err = KeyName::new(bad).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidKey { .. }),
                "expected InvalidKey for {:?}",
                bad
            );
        }
    }

    #[test]
    fn given_multiline_value_when_validating_then_rejects() {
        let key = KeyName::new("K").unwrap();
        assert!(validate_value(&key, "one line").is_ok());
        assert!(validate_value(&key, "").is_ok());
        assert!(matches!(
            validate_value(&key, "two\nlines"),
            Err(DomainError::InvalidValue { .. })
        ));
    }

    #[test]
    fn given_line_endings_when_rendering_then_uses_expected_terminator() {
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::Crlf.as_str(), "\r\n");
        #[cfg(not(windows))]
        assert_eq!(LineEnding::Native.as_str(), "\n");
        #[cfg(windows)]
        assert_eq!(LineEnding::Native.as_str(), "\r\n");
    }
}
