//! Core identity types.
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`Company`] - A ticker paired with its display name
//! - [`Quarter`] - Fiscal quarter label derived from a period date

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A company to extract: ticker plus the display name written to output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Exchange ticker.
    pub symbol: Symbol,
    /// Display name used in the `Company` column.
    pub name: String,
}

impl Company {
    /// Creates a new company entry.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// Calendar quarter of a reporting period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    /// January through March.
    Q1,
    /// April through June.
    Q2,
    /// July through September.
    Q3,
    /// October through December.
    Q4,
}

impl Quarter {
    /// Maps a calendar month (1-12) to its quarter: `((month - 1) / 3) + 1`.
    #[must_use]
    pub const fn from_month(month: u32) -> Option<Self> {
        match month {
            1..=3 => Some(Self::Q1),
            4..=6 => Some(Self::Q2),
            7..=9 => Some(Self::Q3),
            10..=12 => Some(Self::Q4),
            _ => None,
        }
    }

    /// Quarter containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // chrono months are always 1-12.
        Self::from_month(date.month()).unwrap_or(Self::Q4)
    }

    /// Quarter number, 1 through 4.
    #[must_use]
    pub const fn number(&self) -> u32 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}
