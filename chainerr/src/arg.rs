//! Arguments for [`Error::build`] and the [`e!`](crate::e) macro

use crate::{Actor, Error, Kind, Message, Operation};
use std::fmt;
use std::sync::Arc;

/// Type name and value reported for an absent argument.
const NIL: &str = "<nil>";

/// One argument to [`Error::build`].
///
/// Usually produced through `From`, so callers can pass kinds, labels,
/// strings and errors side by side.
#[derive(Clone)]
pub enum Arg {
    Kind(Kind),
    Operation(Operation),
    Actor(Actor),
    Message(Message),
    /// A plain string, taken as the message.
    Text(String),
    /// A structured cause.
    Error(Error),
    /// An external cause.
    Opaque(Arc<anyhow::Error>),
    /// Anything else. Building with it produces a diagnostic error instead.
    Unknown { type_name: String, value: String },
}

impl Arg {
    /// Catch-all for a value of a type the constructor does not understand.
    pub fn unknown<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Arg::Unknown {
            type_name: std::any::type_name::<T>().to_string(),
            value: format!("{:?}", value),
        }
    }

    /// The argument passed in place of a missing value.
    pub fn nil() -> Self {
        Arg::Unknown {
            type_name: NIL.to_string(),
            value: NIL.to_string(),
        }
    }

    /// Wrap an external error as the cause.
    pub fn opaque<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Arg::from(anyhow::Error::new(err))
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Arg::Operation(operation) => f.debug_tuple("Operation").field(operation).finish(),
            Arg::Actor(actor) => f.debug_tuple("Actor").field(actor).finish(),
            Arg::Message(message) => f.debug_tuple("Message").field(message).finish(),
            Arg::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Arg::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Arg::Opaque(source) => f.debug_tuple("Opaque").field(&format!("{:#}", source)).finish(),
            Arg::Unknown { type_name, value } => f
                .debug_struct("Unknown")
                .field("type_name", type_name)
                .field("value", value)
                .finish(),
        }
    }
}

// =============================================================================
// Field arguments
// =============================================================================

impl From<Kind> for Arg {
    fn from(kind: Kind) -> Self {
        Arg::Kind(kind)
    }
}

impl From<Operation> for Arg {
    fn from(operation: Operation) -> Self {
        Arg::Operation(operation)
    }
}

impl From<Actor> for Arg {
    fn from(actor: Actor) -> Self {
        Arg::Actor(actor)
    }
}

impl From<Message> for Arg {
    fn from(message: Message) -> Self {
        Arg::Message(message)
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Arg::Text(text.to_string())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Arg::Text(text)
    }
}

impl From<&String> for Arg {
    fn from(text: &String) -> Self {
        Arg::Text(text.clone())
    }
}

// =============================================================================
// Cause arguments
// =============================================================================

impl From<Error> for Arg {
    fn from(err: Error) -> Self {
        Arg::Error(err)
    }
}

impl From<&Error> for Arg {
    fn from(err: &Error) -> Self {
        Arg::Error(err.clone())
    }
}

/// An `anyhow::Error` whose outermost layer is an [`Error`] is unwrapped.
/// Anything with added context stays opaque so the context is kept.
impl From<anyhow::Error> for Arg {
    fn from(err: anyhow::Error) -> Self {
        let outermost: &(dyn std::error::Error + Send + Sync + 'static) = &*err;
        if !outermost.is::<Error>() {
            return Arg::Opaque(Arc::new(err));
        }
        match err.downcast::<Error>() {
            Ok(structured) => Arg::Error(structured),
            Err(err) => Arg::Opaque(Arc::new(err)),
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Arg {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match err.downcast::<Error>() {
            Ok(structured) => Arg::Error(*structured),
            Err(err) => Arg::Opaque(Arc::new(anyhow::anyhow!(err))),
        }
    }
}

impl From<std::io::Error> for Arg {
    fn from(err: std::io::Error) -> Self {
        Arg::opaque(err)
    }
}

impl From<fmt::Error> for Arg {
    fn from(err: fmt::Error) -> Self {
        Arg::opaque(err)
    }
}

/// `None` is a missing argument, not an absent one.
impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Arg::nil, Into::into)
    }
}

// =============================================================================
// Values that are never valid arguments
// =============================================================================

macro_rules! unknown_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::unknown(&value)
                }
            }
        )*
    };
}

unknown_arg!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_conversions() {
        assert!(matches!(Arg::from(Kind::IO), Arg::Kind(Kind::IO)));
        assert!(matches!(Arg::from("foo"), Arg::Text(ref s) if s == "foo"));
        assert!(matches!(Arg::from(Message::from("foo")), Arg::Message(_)));
        assert!(matches!(Arg::from(Some(Kind::IO)), Arg::Kind(Kind::IO)));
    }

    #[test]
    fn test_anyhow_unwraps_structured() {
        let structured = anyhow::Error::new(Error::new().with_kind(Kind::Conflict));
        match Arg::from(structured) {
            Arg::Error(err) => assert_eq!(err.kind(), Kind::Conflict),
            other => panic!("expected structured cause, got {:?}", other),
        }

        let plain = anyhow::anyhow!("boom");
        assert!(matches!(Arg::from(plain), Arg::Opaque(_)));
    }

    #[test]
    fn test_anyhow_context_stays_opaque() {
        let inner = Error::new().with_kind(Kind::NotFound).with_message("row 7");
        let wrapped = anyhow::Error::new(inner).context("while loading user");

        let err = crate::e!(Operation::from("svc::get"), wrapped).unwrap();
        assert!(matches!(err.cause(), Some(crate::Cause::Opaque(_))));
        assert_eq!(
            err.to_string(),
            "svc::get: while loading user: item does not exist: row 7"
        );
        assert!(!err.is(Kind::NotFound));

        let wrapped = anyhow::Error::new(Error::new().with_kind(Kind::Conflict)).context("saving");
        let err = Error::new().with_source(wrapped);
        assert!(matches!(err.cause(), Some(crate::Cause::Opaque(_))));
        assert!(!err.is(Kind::Conflict));
    }

    #[test]
    fn test_boxed_errors() {
        let parse_err = "12x".parse::<i32>().unwrap_err();
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(parse_err);
        let err = crate::e!(Kind::Malformed, boxed).unwrap();
        assert!(matches!(err.cause(), Some(crate::Cause::Opaque(_))));
        assert_eq!(err.to_string(), "malformed request: invalid digit found in string");

        let boxed: Box<dyn std::error::Error + Send + Sync> =
            Box::new(Error::new().with_kind(Kind::Permission));
        match Arg::from(boxed) {
            Arg::Error(err) => assert_eq!(err.kind(), Kind::Permission),
            other => panic!("expected structured cause, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_values() {
        match Arg::from(7u8) {
            Arg::Unknown { type_name, value } => {
                assert_eq!(type_name, "u8");
                assert_eq!(value, "7");
            }
            other => panic!("expected unknown, got {:?}", other),
        }

        match Arg::from(None::<Error>) {
            Arg::Unknown { type_name, value } => {
                assert_eq!(type_name, "<nil>");
                assert_eq!(value, "<nil>");
            }
            other => panic!("expected unknown, got {:?}", other),
        }

        let err = Error::build([Arg::unknown(&vec![1, 2])]).unwrap();
        assert!(err.message().starts_with("unknown type "));
        assert!(err.message().ends_with("Vec<i32> with value [1, 2] in error call"));
    }
}
