//! Operation layer: one function per backend operation, tying together
//! validation → API call → declared cache effect. Views call these and
//! render the result; they never touch the transport or the cache directly.

pub mod admin;
pub mod auth;
pub mod employee;
pub mod employer;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ClientError;

/// Proof of an explicit user confirmation. Destructive operations (deletes,
/// cleanup, account deactivation) take one by value, so no call site can
/// issue them without the confirming step having happened first.
#[derive(Debug)]
pub struct Confirmed;

pub(crate) fn parse<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    Ok(serde_json::from_value(value)?)
}
