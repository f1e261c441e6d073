//! Exact-match filter over the items of a single thesaurus version.
//!
//! An [`ItemFilter`] is used in two ways by the query layer:
//!
//! - **list**: an empty filter selects every item of the version.
//! - **validate**: an empty filter is a caller error (see
//!   [`ItemFilter::require_any`]); a non-empty filter that matches nothing is
//!   a not-found condition.

use crate::error::CoreError;

/// Name reported by [`CoreError::MissingParameter`] for an empty filter.
pub const FILTER_PARAMETERS: &str = "code and value";

/// Optional `code` / `value` constraints, combined with AND.
///
/// Empty strings are treated as absent, so `?code=` behaves like no `code`
/// parameter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    code: Option<String>,
    value: Option<String>,
}

impl ItemFilter {
    pub fn new(code: Option<String>, value: Option<String>) -> Self {
        Self {
            code: code.filter(|c| !c.is_empty()),
            value: value.filter(|v| !v.is_empty()),
        }
    }

    pub fn by_code(code: impl Into<String>) -> Self {
        Self::new(Some(code.into()), None)
    }

    pub fn by_value(value: impl Into<String>) -> Self {
        Self::new(None, Some(value.into()))
    }

    pub fn by_code_and_value(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Some(code.into()), Some(value.into()))
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// `true` when neither `code` nor `value` is set.
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.value.is_none()
    }

    /// Fail fast when a validate operation is called without any filter.
    pub fn require_any(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            Err(CoreError::MissingParameter(FILTER_PARAMETERS))
        } else {
            Ok(())
        }
    }

    /// Human-readable form used in not-found errors, e.g. `code=123, value=A`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(code) = &self.code {
            parts.push(format!("code={code}"));
        }
        if let Some(value) = &self.value {
            parts.push(format!("value={value}"));
        }
        parts.join(", ")
    }
}
