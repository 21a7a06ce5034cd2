//! Resource declarations

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::section::Section;
use super::value::Value;

/// What the engine does with the underlying cloud resource when the stack
/// deletes it.
///
/// This is the one attribute that may be patched onto a resource after it has
/// been registered; everything else is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeletionPolicy {
    Delete,
    Retain,
    Snapshot,
}

impl fmt::Display for DeletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeletionPolicy::Delete => "Delete",
            DeletionPolicy::Retain => "Retain",
            DeletionPolicy::Snapshot => "Snapshot",
        };
        write!(f, "{}", name)
    }
}

/// A resource declaration: a type identifier plus an ordered property bag.
///
/// Property values may be literals or symbolic expressions; nothing is
/// resolved or validated here beyond name uniqueness in the bag.
#[derive(Debug, Clone)]
pub struct Resource {
    kind: String,
    properties: Section<Value>,
    condition: Option<String>,
    deletion_policy: Option<DeletionPolicy>,
}

impl Resource {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            properties: Section::new(),
            condition: None,
            deletion_policy: None,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Set a property. Later writes to the same name win, matching the
    /// "declare then patch" shape of the source templates.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.properties.get_mut(&name) {
            *existing = value;
        } else {
            self.properties.insert(name, value);
        }
        self
    }

    /// Only create this resource when the named condition holds
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_deletion_policy(mut self, policy: DeletionPolicy) -> Self {
        self.deletion_policy = Some(policy);
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn deletion_policy(&self) -> Option<DeletionPolicy> {
        self.deletion_policy
    }

    pub(crate) fn set_deletion_policy(&mut self, policy: DeletionPolicy) {
        self.deletion_policy = Some(policy);
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("Type", &self.kind)?;
        if let Some(condition) = &self.condition {
            map.serialize_entry("Condition", condition)?;
        }
        if let Some(policy) = &self.deletion_policy {
            map.serialize_entry("DeletionPolicy", policy)?;
        }
        if !self.properties.is_empty() {
            map.serialize_entry("Properties", &self.properties)?;
        }
        map.end()
    }
}
