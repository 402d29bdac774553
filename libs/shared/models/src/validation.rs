use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field validation failures keyed by dotted path (`timeSlots.0.slots.1.startTime`).
///
/// Messages for a path keep the order in which rules reported them; the first
/// one is what a form shows under the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    /// Adds `message` under `path` when `failed` holds.
    pub fn check(&mut self, failed: bool, path: impl Into<String>, message: impl Into<String>) {
        if failed {
            self.add(path, message);
        }
    }

    pub fn first(&self, path: &str) -> Option<&str> {
        self.0.get(path).and_then(|messages| messages.first()).map(String::as_str)
    }

    pub fn messages(&self, path: &str) -> &[String] {
        self.0.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, messages) in &self.0 {
            if let Some(message) = messages.first() {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", path, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_wins_for_display() {
        let mut errors = FieldErrors::new();
        errors.add("username", "Username is required");
        errors.add("username", "Username must be at least 4 characters");

        assert_eq!(errors.first("username"), Some("Username is required"));
        assert_eq!(errors.messages("username").len(), 2);
        assert_eq!(errors.first("email"), None);
    }

    #[test]
    fn empty_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.check(true, "timeSlots", "At least one day with time slots is required");
        errors.check(false, "name", "never added");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(!err.contains("name"));
    }
}
