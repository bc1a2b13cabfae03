//! Three-state field update used by partial writes.

use serde::{Deserialize, Serialize};

/// A partial-update slot for an optional field.
///
/// `Keep` leaves the stored value untouched, so a patch built with
/// `Default::default()` is a no-op.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    /// Whether this patch modifies the field at all.
    pub fn touches(&self) -> bool {
        !matches!(self, Patch::Keep)
    }

    /// Apply the patch to an optional slot, returning the new value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Keep => current,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }
}
