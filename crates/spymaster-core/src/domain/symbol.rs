use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Ticker typed into the search field, trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trim and upper-case a ticker. Only blank input is rejected.
    ///
    /// Exchange suffixes (`7203.T`), share classes (`BRK/B`) and index or
    /// currency notation (`^GSPC`, `EURUSD=X`) all pass through; the backend
    /// decides whether the ticker exists. Use [`Symbol::path_segment`] when
    /// building URLs.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form for use as a URL path segment.
    ///
    /// Dot segments are encoded too so URL normalization cannot turn the
    /// ticker into a parent-directory reference.
    pub fn path_segment(&self) -> String {
        match self.0.as_str() {
            "." => String::from("%2E"),
            ".." => String::from("%2E%2E"),
            other => urlencoding::encode(other).into_owned(),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
