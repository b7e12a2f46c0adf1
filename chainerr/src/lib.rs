//! # chainerr
//!
//! Structured errors that can be rendered for people and classified by code.
//!
//! ## Design Philosophy
//!
//! - **Kind**: Know what category of failure occurred (e.g. Permission, NotFound)
//! - **Context**: The operation that failed, the user involved and a message
//! - **Cause**: Wrap the error that triggered this one, forming a chain
//!
//! ## Usage
//!
//! ```rust
//! use chainerr::{e, errorf, Kind, Operation};
//!
//! fn open(name: &str) -> chainerr::Result<()> {
//!     let cause = errorf!("{} is missing", name);
//!     Err(e!(Operation::from("config::open"), Kind::NotFound, cause).unwrap())
//! }
//!
//! let err = open("app.toml").unwrap_err();
//! assert_eq!(err.to_string(), "config::open: item does not exist:\n\tapp.toml is missing");
//! assert!(chainerr::is(Kind::NotFound, &err));
//! ```
//!
//! ## Rules
//!
//! - `e!()` with no arguments is `None`: no error happened
//! - Levels with kind `Other` defer classification to their cause
//! - Wrapping copies a structured error; later changes to the original do not
//!   reach the chain

mod arg;
mod codec;
mod error;
pub mod inspect;
mod kind;

pub use arg::Arg;
pub use error::{Actor, Cause, Error, Message, Operation, NO_ERROR_MESSAGE};
pub use inspect::{is, matches, Chain};
pub use kind::{Kind, UnknownKind, UNKNOWN_KIND_LABEL};

/// Result type alias using chainerr Error
pub type Result<T> = std::result::Result<T, Error>;

/// Build an [`Error`] from any mix of kinds, labels, strings and errors.
///
/// Expands to an `Option<Error>`, `None` when called without arguments. See
/// [`Error::build`] for how each argument is applied.
#[macro_export]
macro_rules! e {
    () => {
        ::core::option::Option::<$crate::Error>::None
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::Error::build([$($crate::Arg::from($arg)),+])
    };
}

/// Build an [`Error`] whose message is the formatted arguments.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::Error::formatted(::core::format_args!($($arg)*))
    };
}
