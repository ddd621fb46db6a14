//! Tri-state field marker for partial updates.
//!
//! A JSON body of `{}` and `{"parent_id": null}` mean different things on a
//! PUT: the first leaves the column alone, the second clears it. Plain
//! `Option<T>` collapses both into `None`, so update DTOs use [`Patch<T>`]
//! together with `#[serde(default)]`:
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct UpdateFolder {
//!     #[serde(default)]
//!     parent_id: Patch<DbId>,
//! }
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::ValidationError;

/// Presence marker for a single field of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was absent from the request body.
    #[default]
    Unset,
    /// The field was present with an explicit `null`.
    Null,
    /// The field was present with a value.
    Value(T),
}

impl<T> Patch<T> {
    /// Whether the request mentioned this field at all.
    pub fn is_set(&self) -> bool {
        !matches!(self, Patch::Unset)
    }

    /// The supplied value, if any. `Unset` and `Null` both yield `None`;
    /// pair with [`Patch::is_set`] when the difference matters.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            Patch::Unset | Patch::Null => None,
        }
    }

    /// Run `check` against a supplied value, rejecting an explicit `null`.
    ///
    /// Used for columns that are `NOT NULL` in storage.
    pub fn validate_non_null<F>(&self, check: F) -> Result<(), ValidationError>
    where
        F: FnOnce(&T) -> Result<(), ValidationError>,
    {
        match self {
            Patch::Unset => Ok(()),
            Patch::Null => Err(ValidationError::new("null")
                .with_message(Cow::Borrowed("Field may be omitted but cannot be null"))),
            Patch::Value(v) => check(v),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

// `Unset` and `Null` both serialize as `null`. validator records the
// rejected value as an error param, which needs this.
impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    // Only called when the key is present; absent keys fall back to
    // `Default` (`Unset`) through `#[serde(default)]`.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}
