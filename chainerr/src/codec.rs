//! serde support for [`Error`]
//!
//! Fields are named `kind`, `method`, `username`, `message` and `err`. The
//! kind is its numeric code. A structured cause nests as another object; an
//! opaque cause is written as its description and read back as an opaque
//! error carrying that text.

use crate::{Actor, Cause, Error, Kind, Message, Operation};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Error", 5)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("method", &self.operation)?;
        state.serialize_field("username", &self.actor)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("err", &self.cause)?;
        state.end()
    }
}

impl Serialize for Cause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cause::Error(err) => err.serialize(serializer),
            Cause::Opaque(source) => serializer.collect_str(&format_args!("{:#}", source)),
        }
    }
}

#[derive(Deserialize)]
struct ErrorRepr {
    #[serde(default)]
    kind: Kind,
    #[serde(default)]
    method: Operation,
    #[serde(default)]
    username: Actor,
    #[serde(default)]
    message: Message,
    #[serde(default)]
    err: Option<CauseRepr>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CauseRepr {
    Structured(Box<Error>),
    Opaque(String),
}

impl From<CauseRepr> for Cause {
    fn from(repr: CauseRepr) -> Self {
        match repr {
            CauseRepr::Structured(err) => Cause::Error(err),
            CauseRepr::Opaque(text) => Cause::Opaque(Arc::new(anyhow::Error::msg(text))),
        }
    }
}

impl<'de> Deserialize<'de> for Error {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = ErrorRepr::deserialize(deserializer)?;
        Ok(Error {
            kind: repr.kind,
            operation: repr.method,
            actor: repr.username,
            message: repr.message,
            cause: repr.err.map(Cause::from),
        })
    }
}
