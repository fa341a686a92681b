//! The set of edits requested on the command line.
//!
//! [`ModificationRequest`] is built once from the arguments and then shared
//! read-only across every file. String arguments and parsed integers live in
//! two maps keyed by [`TagCode`]; a numeric code appears in both, a text code
//! only in the first.
//!
//! # Example
//!
//! ```
//! use mp4tags::{ModificationRequest, TagCode};
//!
//! let request = ModificationRequest::new()
//!     .with_value(TagCode::Song, "Intro")?
//!     .with_value(TagCode::Tracks, "12")?
//!     .with_removals("c");
//! assert_eq!(request.modification_count(), 3);
//! assert_eq!(request.number(TagCode::Tracks), Some(12));
//! # Ok::<(), mp4tags::TagError>(())
//! ```

use std::collections::BTreeMap;

use crate::{
    error::TagError,
    tag_code::{PairField, TagCode, ValueKind},
    utilities::parse_leading_integer,
};

/// Sparse table of requested tag values plus the removal list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModificationRequest {
    strings: BTreeMap<TagCode, String>,
    numbers: BTreeMap<TagCode, i32>,
    removals: Option<String>,
    modifications: usize,
}

impl ModificationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw argument for `code`, parsing it first if the code is numeric.
    ///
    /// A code given twice keeps the later value. Arguments for
    /// [`TagCode::Remove`] become the removal list.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::NumericArgument`] when a numeric code's argument
    /// has no leading integer. Nothing is recorded in that case.
    pub fn insert(&mut self, code: TagCode, raw: &str) -> Result<(), TagError> {
        match code.value_kind() {
            ValueKind::Numeric => {
                let number =
                    parse_leading_integer(raw).ok_or_else(|| TagError::NumericArgument {
                        flag: code.as_char(),
                        value: raw.to_string(),
                    })?;
                self.numbers.insert(code, number);
                self.strings.insert(code, raw.to_string());
            }
            ValueKind::CodeList => {
                self.record_removals(raw);
                return Ok(());
            }
            ValueKind::Text | ValueKind::Path => {
                self.strings.insert(code, raw.to_string());
            }
        }
        self.modifications += 1;
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`TagError::NumericArgument`] if `code` is numeric and `value`
    /// has no leading integer.
    pub fn with_value(mut self, code: TagCode, value: &str) -> Result<Self, TagError> {
        self.insert(code, value)?;
        Ok(self)
    }

    /// Set the list of codes to remove, e.g. `"cs"` for comment and song.
    #[must_use]
    pub fn with_removals(mut self, codes: &str) -> Self {
        self.record_removals(codes);
        self
    }

    fn record_removals(&mut self, codes: &str) {
        self.removals = Some(codes.to_string());
        self.modifications += 1;
    }

    /// Raw argument recorded for `code`.
    pub fn string(&self, code: TagCode) -> Option<&str> {
        self.strings.get(&code).map(String::as_str)
    }

    /// Parsed integer recorded for a numeric `code`.
    pub fn number(&self, code: TagCode) -> Option<i32> {
        self.numbers.get(&code).copied()
    }

    /// Whether any half of a paired field was requested.
    pub fn touches_pair(&self, field: PairField) -> bool {
        let (number, total) = field.codes();
        self.numbers.contains_key(&number) || self.numbers.contains_key(&total)
    }

    /// Codes in the removal list, in order.
    ///
    /// Characters that are not tag codes are skipped.
    pub fn removals(&self) -> impl Iterator<Item = TagCode> + '_ {
        self.removals
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter_map(TagCode::from_char)
    }

    pub fn has_removals(&self) -> bool {
        self.removals.is_some()
    }

    /// Text, numeric and path codes with a recorded value, in code order.
    pub fn requested_codes(&self) -> impl Iterator<Item = TagCode> + '_ {
        self.strings.keys().copied()
    }

    /// Number of options that requested a change.
    pub fn modification_count(&self) -> usize {
        self.modifications
    }

    pub fn is_empty(&self) -> bool {
        self.modifications == 0
    }
}
