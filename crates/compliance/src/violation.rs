//! Violation types
//!
//! A [`ViolationSet`] maps a violation label to its explanatory message.
//! Entries keep the order in which the rules fired, and that order carries
//! through to JSON output and the rendered report.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumString};

/// The policy infractions the engine knows about, in evaluation order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
pub enum ViolationKind {
    #[strum(serialize = "Over Budget")]
    #[serde(rename = "Over Budget")]
    OverBudget,

    #[strum(serialize = "Unauthorized Category")]
    #[serde(rename = "Unauthorized Category")]
    UnauthorizedCategory,

    #[strum(serialize = "Missing Justification")]
    #[serde(rename = "Missing Justification")]
    MissingJustification,

    #[strum(serialize = "Outlier")]
    #[serde(rename = "Outlier")]
    Outlier,
}

/// A single named policy infraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

/// Ordered, key-unique set of violations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationSet {
    entries: Vec<Violation>,
}

impl ViolationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    ///
    /// Re-inserting a kind replaces its message in place and returns the old
    /// one; position is kept.
    pub fn insert(&mut self, kind: ViolationKind, message: impl Into<String>) -> Option<String> {
        let message = message.into();
        match self.entries.iter_mut().find(|v| v.kind == kind) {
            Some(existing) => Some(std::mem::replace(&mut existing.message, message)),
            None => {
                self.entries.push(Violation { kind, message });
                None
            }
        }
    }

    pub fn get(&self, kind: ViolationKind) -> Option<&str> {
        self.entries
            .iter()
            .find(|v| v.kind == kind)
            .map(|v| v.message.as_str())
    }

    pub fn contains(&self, kind: ViolationKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.entries.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ViolationKind> + '_ {
        self.entries.iter().map(|v| v.kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ViolationSet {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ViolationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for violation in &self.entries {
            map.serialize_entry(&violation.kind, &violation.message)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ViolationSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = ViolationSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of violation label to message")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut set = ViolationSet::new();
                while let Some((kind, message)) = access.next_entry::<ViolationKind, String>()? {
                    set.insert(kind, message);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}
