//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.
//!
//! Identifiers in this system are client-visible strings: users may
//! register with an id minted on the device, and habit ids are always
//! chosen by the client. A freshly minted id is a UUIDv4 string.

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Generic typed ID wrapper over an opaque string.
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Mint a new random ID (UUIDv4 string).
    pub fn new() -> Self {
        Self::from_string(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier string.
    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume into the underlying string.
    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl<T> From<Id<T>> for String {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T> serde::Serialize for Id<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> serde::Deserialize<'de> for Id<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_string)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct User;

    /// Marker for Habit IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Habit;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type HabitId = Id<markers::Habit>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let user_id: UserId = Id::new();
        let habit_id: HabitId = Id::from_string("morning-run");

        // Different marker types cannot be mixed
        let _u: String = user_id.into_string();
        let _h: String = habit_id.into_string();
    }

    #[test]
    fn test_new_ids_are_unique() {
        let a: UserId = Id::new();
        let b: UserId = Id::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_preserves_client_string() {
        let id: HabitId = Id::from_string("h1");
        assert_eq!(id.as_str(), "h1");
        assert_eq!(id.to_string(), "h1");
    }

    #[test]
    fn test_id_serde_is_plain_string() {
        let id: HabitId = Id::from_string("h1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"h1\"");

        let back: HabitId = serde_json::from_str("\"h1\"").unwrap();
        assert_eq!(back, id);
    }
}
