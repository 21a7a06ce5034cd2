//! Insertion-ordered sections of a template

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// The named sections a declaration can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Parameters,
    Mappings,
    Conditions,
    Resources,
    Outputs,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKind::Parameters => "Parameters",
            SectionKind::Mappings => "Mappings",
            SectionKind::Conditions => "Conditions",
            SectionKind::Resources => "Resources",
            SectionKind::Outputs => "Outputs",
        };
        write!(f, "{}", name)
    }
}

/// An ordered mapping from logical name to declaration.
///
/// Entries serialize in insertion order. Downstream readers of the rendered
/// template rely on that order for readability, so it is part of the
/// contract, not an accident of the backing container.
#[derive(Debug, Clone)]
pub struct Section<T> {
    entries: Vec<(String, T)>,
}

impl<T> Section<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert a declaration under a logical name.
    ///
    /// Returns false (and leaves the section untouched) if the name is
    /// already taken. Sections hold at most a handful of entries, so the
    /// linear scan is fine.
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, value));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Logical names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Serialize for Section<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
