//! Classifying and comparing errors

use crate::{Cause, Error, Kind};
use std::error::Error as StdError;

/// Returns true if `err` is a structured [`Error`] classified as `kind`.
///
/// Levels whose kind is `Other` are skipped in favour of their cause. The
/// first level with any other kind decides the answer, whatever it wraps.
pub fn is(kind: Kind, err: &(dyn StdError + 'static)) -> bool {
    err.downcast_ref::<Error>().is_some_and(|err| err.is(kind))
}

/// Returns true if `a` and `b` are both structured and equal field by field,
/// causes included. An opaque cause never matches anything.
pub fn matches(a: &(dyn StdError + 'static), b: &(dyn StdError + 'static)) -> bool {
    match (a.downcast_ref::<Error>(), b.downcast_ref::<Error>()) {
        (Some(a), Some(b)) => a.matches(b),
        _ => false,
    }
}

/// Iterator over the structured levels of an error chain, outermost first.
///
/// Stops before an opaque cause.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause().and_then(Cause::as_error);
        Some(current)
    }
}

impl Error {
    /// Check whether this error is classified as `kind`; see [`is`]
    pub fn is(&self, kind: Kind) -> bool {
        self.chain()
            .find(|level| !level.kind().is_other())
            .is_some_and(|level| level.kind() == kind)
    }

    /// Compare field by field with `other`; see [`matches`]
    pub fn matches(&self, other: &Error) -> bool {
        if self.kind != other.kind
            || self.operation != other.operation
            || self.actor != other.actor
            || self.message != other.message
        {
            return false;
        }

        match (&self.cause, &other.cause) {
            (None, None) => true,
            (Some(Cause::Error(a)), Some(Cause::Error(b))) => a.matches(b),
            _ => false,
        }
    }

    /// Iterate over this error and its structured causes
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The innermost structured error of the chain.
    pub fn root_cause(&self) -> &Error {
        self.chain().last().unwrap_or(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Actor, Message, Operation};

    fn io_error() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, "foo")
    }

    #[test]
    fn test_is() {
        let err = Error::new().with_kind(Kind::Permission);
        assert!(is(Kind::Permission, &err));
        assert!(!is(Kind::Permission, &Error::new()));

        let nested = Error::new().with_cause(Error::new().with_kind(Kind::Permission));
        assert!(is(Kind::Permission, &nested));

        assert!(!is(Kind::Permission, &io_error()));
    }

    #[test]
    fn test_is_stops_at_first_declared_kind() {
        let err = Error::new()
            .with_kind(Kind::Conflict)
            .with_cause(Error::new().with_kind(Kind::Permission));
        assert!(err.is(Kind::Conflict));
        assert!(!err.is(Kind::Permission));

        let deep = Error::new().with_cause(
            Error::new()
                .with_message("wrapper")
                .with_cause(Error::new().with_kind(Kind::NotFound)),
        );
        assert!(deep.is(Kind::NotFound));

        let opaque = Error::new().with_source(io_error());
        assert!(!opaque.is(Kind::Permission));
        assert!(!opaque.is(Kind::Other));
    }

    #[test]
    fn test_matches_rejects_unstructured() {
        assert!(!matches(&io_error(), &Error::new()));
        assert!(!matches(&Error::new(), &io_error()));
        assert!(!matches(&io_error(), &io_error()));
    }

    #[test]
    fn test_matches_fields() {
        let cases = [
            (Error::new().with_kind(Kind::Permission), Error::new().with_kind(Kind::Conflict)),
            (Error::new().with_operation("foo"), Error::new().with_operation("bar")),
            (Error::new().with_actor("foo"), Error::new().with_actor("bar")),
            (Error::new().with_message("foo"), Error::new().with_message("bar")),
        ];
        for (a, b) in cases {
            assert!(!matches(&a, &b), "{:?} should not match {:?}", a, b);
            assert!(matches(&a, &a.clone()));
        }
    }

    #[test]
    fn test_matches_causes() {
        let opaque = Error::new().with_source(io_error());
        assert!(!matches(&opaque, &Error::new()));
        assert!(!opaque.matches(&opaque.clone()));

        let a = Error::new().with_cause(Error::new().with_kind(Kind::Permission));
        let b = Error::new().with_cause(Error::new().with_kind(Kind::Conflict));
        assert!(!matches(&a, &b));

        let a = Error::new().with_cause(Error::new());
        let b = Error::new().with_cause(Error::new());
        assert!(matches(&a, &b));

        let structured = Error::new().with_cause(Error::new().with_message("foo"));
        assert!(!structured.matches(&opaque));
    }

    #[test]
    fn test_matches_built_value() {
        let built = crate::e!(
            Kind::Permission,
            Operation::from("method"),
            Actor::from("username"),
            Message::from("message")
        )
        .unwrap();
        let expected = Error::new()
            .with_kind(Kind::Permission)
            .with_operation("method")
            .with_actor("username")
            .with_message("message");
        assert!(matches(&expected, &built));
    }

    #[test]
    fn test_chain_and_root_cause() {
        let err = Error::new()
            .with_message("a")
            .with_cause(Error::new().with_message("b").with_source(io_error()));
        let messages: Vec<_> = err.chain().map(Error::message).collect();
        assert_eq!(messages, ["a", "b"]);
        assert_eq!(err.root_cause().message(), "b");
    }
}
