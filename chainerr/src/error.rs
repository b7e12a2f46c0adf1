//! The main Error type

use crate::{Arg, Kind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Rendered text of an error that carries nothing displayable.
pub const NO_ERROR_MESSAGE: &str = "no error message";

macro_rules! label {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the label text
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// An empty label counts as absent
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

label! {
    /// The method or operation that failed, serialized as `method`
    Operation
}

label! {
    /// The user or principal attempting the operation, serialized as `username`
    Actor
}

label! {
    /// Free-text description of what went wrong
    Message
}

/// The error an [`Error`] wraps.
#[derive(Clone)]
pub enum Cause {
    /// A structured error, owned by value.
    Error(Box<Error>),
    /// Any other error, rendered with its full source chain.
    Opaque(Arc<anyhow::Error>),
}

impl Cause {
    /// The structured error, if this cause is one
    pub fn as_error(&self) -> Option<&Error> {
        match self {
            Cause::Error(err) => Some(err),
            Cause::Opaque(_) => None,
        }
    }

    /// Get the cause as a plain `std::error::Error`
    pub fn as_std(&self) -> &(dyn std::error::Error + 'static) {
        match self {
            Cause::Error(err) => &**err,
            Cause::Opaque(source) => {
                let source: &(dyn std::error::Error + Send + Sync + 'static) = &***source;
                source
            }
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Error(err) => fmt::Display::fmt(err, f),
            Cause::Opaque(source) => write!(f, "{:#}", source),
        }
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Cause::Opaque(source) => f.debug_tuple("Opaque").field(&format!("{:#}", source)).finish(),
        }
    }
}

/// A structured error value.
///
/// Carries:
/// - `kind`: the [`Kind`] of failure, `Other` unless set
/// - `operation`: the method that failed
/// - `actor`: the user involved
/// - `message`: human-readable description
/// - `cause`: the wrapped error, if any
///
/// Empty strings mean "absent". Values are built once and never mutated in
/// place; wrapping a structured error stores a copy of it.
///
/// # Example
///
/// ```rust
/// use chainerr::{e, Actor, Kind, Operation};
///
/// let err = e!(Operation::from("store::put"), Actor::from("alice"), Kind::Permission, "read only")
///     .unwrap();
///
/// assert_eq!(err.to_string(), "store::put: alice: permission denied: read only");
/// assert!(err.is(Kind::Permission));
/// ```
#[derive(Clone, Default)]
pub struct Error {
    pub(crate) kind: Kind,
    pub(crate) operation: Operation,
    pub(crate) actor: Actor,
    pub(crate) message: Message,
    pub(crate) cause: Option<Cause>,
}

impl Error {
    /// An error with every field absent; fill it in with the `with_*` builders.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Assemble an error from a sequence of arguments.
    ///
    /// Each argument sets the field matching its variant:
    /// - `Kind`, `Operation` and `Actor` overwrite
    /// - `Message` and `Text` only fill an empty message, so the first wins
    /// - `Error` and `Opaque` set the cause, so the last wins
    /// - `Unknown` discards everything and yields an error describing the
    ///   offending argument instead
    ///
    /// Returns `None` when `args` is empty.
    pub fn build<I>(args: I) -> Option<Error>
    where
        I: IntoIterator<Item = Arg>,
    {
        let mut args = args.into_iter().peekable();
        args.peek()?;

        let mut err = Error::default();
        for arg in args {
            match arg {
                Arg::Kind(kind) => err.kind = kind,
                Arg::Operation(operation) => err.operation = operation,
                Arg::Actor(actor) => err.actor = actor,
                Arg::Message(message) => err.fill_message(message),
                Arg::Text(text) => err.fill_message(Message::from(text)),
                Arg::Error(cause) => err.cause = Some(Cause::Error(Box::new(cause))),
                Arg::Opaque(source) => err.cause = Some(Cause::Opaque(source)),
                Arg::Unknown { type_name, value } => {
                    tracing::warn!(%type_name, %value, "unknown argument type in error call");
                    return Some(Error::formatted(format_args!(
                        "unknown type {} with value {} in error call",
                        type_name, value
                    )));
                }
            }
        }
        Some(err)
    }

    /// An error whose only field is the formatted message.
    pub fn formatted(args: fmt::Arguments<'_>) -> Error {
        Self::build([Arg::Text(args.to_string())]).unwrap_or_default()
    }

    fn fill_message(&mut self, message: Message) {
        if self.message.is_empty() {
            self.message = message;
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the error kind
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Get the operation that failed
    pub fn operation(&self) -> &str {
        self.operation.as_str()
    }

    /// Get the user involved
    pub fn actor(&self) -> &str {
        self.actor.as_str()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Get the wrapped error (if any)
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// True when every field is absent and the kind is `Other`.
    pub fn is_empty(&self) -> bool {
        self.operation.is_empty()
            && self.actor.is_empty()
            && self.message.is_empty()
            && self.kind.is_other()
            && self.cause.is_none()
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_operation(mut self, operation: impl Into<Operation>) -> Self {
        self.operation = operation.into();
        self
    }

    pub fn with_actor(mut self, actor: impl Into<Actor>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Set the message unless one is already present.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.fill_message(message.into());
        self
    }

    /// Wrap a structured error, replacing any previous cause.
    pub fn with_cause(mut self, cause: Error) -> Self {
        self.cause = Some(Cause::Error(Box::new(cause)));
        self
    }

    /// Wrap an external error, replacing any previous cause.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        let source: anyhow::Error = source.into();
        self.cause = match Arg::from(source) {
            Arg::Error(cause) => Some(Cause::Error(Box::new(cause))),
            Arg::Opaque(source) => Some(Cause::Opaque(source)),
            _ => self.cause,
        };
        self
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render as `operation: actor: kind: message: cause`, skipping absent
    /// parts. A non-empty structured cause goes on its own indented line.
    pub fn render(&self) -> String {
        let mut buf = String::new();
        if !self.operation.is_empty() {
            buf.push_str(self.operation.as_str());
        }
        if !self.actor.is_empty() {
            pad(&mut buf, ": ");
            buf.push_str(self.actor.as_str());
        }
        if !self.kind.is_other() {
            pad(&mut buf, ": ");
            buf.push_str(self.kind.as_str());
        }
        if !self.message.is_empty() {
            pad(&mut buf, ": ");
            buf.push_str(self.message.as_str());
        }
        match &self.cause {
            Some(Cause::Error(cause)) => {
                if !cause.is_empty() {
                    pad(&mut buf, ":\n\t");
                    buf.push_str(&cause.render());
                }
            }
            Some(Cause::Opaque(source)) => {
                pad(&mut buf, ": ");
                buf.push_str(&format!("{:#}", source));
            }
            None => {}
        }

        if buf.is_empty() {
            return NO_ERROR_MESSAGE.to_string();
        }
        buf
    }
}

/// Append `sep` only when `buf` already has content.
fn pad(buf: &mut String, sep: &str) {
    if !buf.is_empty() {
        buf.push_str(sep);
    }
}

// =============================================================================
// Display - the rendered chain
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0;
        for level in self.chain() {
            let indent = "    ".repeat(depth);
            if depth > 0 {
                write!(f, "{}Caused by: ", indent)?;
            }
            writeln!(f, "{:?}", level.kind)?;

            if !level.operation.is_empty() {
                writeln!(f, "{}    Operation: {}", indent, level.operation)?;
            }
            if !level.actor.is_empty() {
                writeln!(f, "{}    Actor: {}", indent, level.actor)?;
            }
            if !level.message.is_empty() {
                writeln!(f, "{}    Message: {}", indent, level.message)?;
            }
            if let Some(Cause::Opaque(source)) = &level.cause {
                writeln!(f, "{}    Source: {:#}", indent, source)?;
            }
            depth += 1;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(Cause::as_std)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => Kind::NotFound,
            std::io::ErrorKind::PermissionDenied => Kind::Permission,
            std::io::ErrorKind::AlreadyExists => Kind::Conflict,
            std::io::ErrorKind::InvalidInput => Kind::Invalid,
            std::io::ErrorKind::InvalidData => Kind::Malformed,
            _ => Kind::IO,
        };
        Error::new().with_kind(kind).with_source(err)
    }
}
