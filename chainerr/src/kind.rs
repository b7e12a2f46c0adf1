//! Error kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for a numeric kind code outside the known range.
pub const UNKNOWN_KIND_LABEL: &str = "unknown type";

/// The category of an error.
///
/// `Other` is both a real category and the value an error carries when no
/// kind was supplied. Classification treats it as pass-through, see
/// [`crate::inspect::is`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum Kind {
    /// Unknown error or something that doesn't fit other categories
    #[default]
    Other = 0,
    /// Internal error that should not be shown to the user
    Internal = 1,
    /// Operation is not permitted for this type of item
    Invalid = 2,
    /// Incorrect configuration or values
    Incorrect = 3,
    /// Permission denied
    Permission = 4,
    /// External I/O error
    IO = 5,
    /// The item already exists
    Conflict = 6,
    /// The item does not exist
    NotFound = 7,
    /// The request format is not valid
    Malformed = 8,
}

/// A numeric kind code that names no [`Kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown type {0}")]
pub struct UnknownKind(pub u16);

impl Kind {
    /// Every kind, in code order.
    pub const ALL: [Kind; 9] = [
        Kind::Other,
        Kind::Internal,
        Kind::Invalid,
        Kind::Incorrect,
        Kind::Permission,
        Kind::IO,
        Kind::Conflict,
        Kind::NotFound,
        Kind::Malformed,
    ];

    /// Returns the canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Other => "other error",
            Kind::Internal => "internal error",
            Kind::Invalid => "invalid operation",
            Kind::Incorrect => "incorrect configuration",
            Kind::Permission => "permission denied",
            Kind::IO => "I/O error",
            Kind::Conflict => "item already exists",
            Kind::NotFound => "item does not exist",
            Kind::Malformed => "malformed request",
        }
    }

    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Look up the kind with the given numeric code.
    pub fn from_code(code: u16) -> Option<Kind> {
        Kind::ALL.get(usize::from(code)).copied()
    }

    /// Label for a raw code; codes outside the enumeration read as
    /// [`UNKNOWN_KIND_LABEL`].
    pub fn label_for_code(code: u16) -> &'static str {
        Kind::from_code(code).map_or(UNKNOWN_KIND_LABEL, |kind| kind.as_str())
    }

    /// `Other` carries no classification of its own.
    pub fn is_other(&self) -> bool {
        *self == Kind::Other
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Kind> for u16 {
    fn from(kind: Kind) -> Self {
        kind.code()
    }
}

impl TryFrom<u16> for Kind {
    type Error = UnknownKind;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Kind::from_code(code).ok_or(UnknownKind(code))
    }
}
