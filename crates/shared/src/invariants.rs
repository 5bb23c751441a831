//! Compile-time helpers for carrying validated invariants.

use serde::Serialize;

/// Proof wrapper indicating a value has passed request validation.
///
/// Only validators construct this; handlers downstream accept `Validated<T>`
/// instead of re-checking the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    /// Wrap a validated value.
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the inner value.
    pub const fn as_ref(&self) -> &T {
        &self.0
    }

    /// Consume and return the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_serializes_transparently() -> Result<(), serde_json::Error> {
        let value = Validated::new(vec![1, 2]);
        assert_eq!(serde_json::to_string(&value)?, "[1,2]");
        assert_eq!(value.len(), 2);
        assert_eq!(value.into_inner(), vec![1, 2]);
        Ok(())
    }
}
