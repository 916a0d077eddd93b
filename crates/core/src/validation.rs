//! Field validation rules for records.
//!
//! Each record kind declares a fixed table of [`FieldRule`]s. Validation is a
//! pure function over the candidate values and yields every [`Violation`] in
//! declaration order, at most one per field.

use thiserror::Error;

/// A single field failing a required-presence or length-range rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Violation {
    /// JSON name of the offending field (e.g. `lastName`).
    pub field: &'static str,
    /// Human-readable description of the broken rule.
    pub message: String,
}

/// Presence and length constraints for one field.
///
/// Lengths are counted in characters, not bytes, and both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// JSON name of the field.
    pub field: &'static str,
    /// Label used in violation messages (e.g. "last name").
    pub label: &'static str,
    /// Whether the field must be present and non-blank.
    pub required: bool,
    /// Minimum length when present.
    pub min: usize,
    /// Maximum length when present.
    pub max: usize,
}

impl FieldRule {
    /// A field that must be present, non-blank, and within `min..=max` characters.
    #[must_use]
    pub const fn required(field: &'static str, label: &'static str, min: usize, max: usize) -> Self {
        Self {
            field,
            label,
            required: true,
            min,
            max,
        }
    }

    /// A field that may be absent, but must be within `min..=max` characters when given.
    #[must_use]
    pub const fn optional(field: &'static str, label: &'static str, min: usize, max: usize) -> Self {
        Self {
            field,
            label,
            required: false,
            min,
            max,
        }
    }

    /// Check a single value against this rule.
    ///
    /// `None` means the field was absent. A blank required field reports the
    /// presence violation only.
    #[must_use]
    pub fn check(&self, value: Option<&str>) -> Option<Violation> {
        let Some(value) = value else {
            return self.required.then(|| self.mandatory());
        };

        if self.required && value.trim().is_empty() {
            return Some(self.mandatory());
        }

        let len = value.chars().count();
        if len < self.min || len > self.max {
            return Some(self.out_of_range());
        }

        None
    }

    fn mandatory(&self) -> Violation {
        Violation {
            field: self.field,
            message: format!("The {} is mandatory", self.label),
        }
    }

    fn out_of_range(&self) -> Violation {
        let message = if self.min == 0 {
            format!("The {} must be at most {} characters", self.label, self.max)
        } else {
            format!(
                "The {} must be between {} and {} characters",
                self.label, self.min, self.max
            )
        };

        Violation {
            field: self.field,
            message,
        }
    }
}

/// Evaluate `(rule, value)` pairs in order and collect every violation.
#[must_use]
pub fn validate<'a, I>(fields: I) -> Vec<Violation>
where
    I: IntoIterator<Item = (&'a FieldRule, Option<&'a str>)>,
{
    fields
        .into_iter()
        .filter_map(|(rule, value)| rule.check(value))
        .collect()
}
