//! Ordered zone collection for one surface.
//!
//! Serializes as the JSON object the analysis backend expects:
//! `{"<zone name>": [{"x": 1, "y": 2}, ...], ...}`. Insertion order is kept
//! for display; it has no effect on containment.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::geometry::Point;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoneSet {
    entries: Vec<(String, Vec<Point>)>,
}

impl ZoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten zone keeps its display position.
    /// Returns the previous points when the name already existed.
    pub fn insert(&mut self, name: impl Into<String>, points: Vec<Point>) -> Option<Vec<Point>> {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, points)),
            None => {
                self.entries.push((name, points));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Point]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, points)| points.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<Point>> {
        let idx = self.entries.iter().position(|(existing, _)| existing == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Point])> {
        self.entries
            .iter()
            .map(|(name, points)| (name.as_str(), points.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<Point>)> for ZoneSet {
    fn from_iter<I: IntoIterator<Item = (N, Vec<Point>)>>(iter: I) -> Self {
        let mut set = ZoneSet::new();
        for (name, points) in iter {
            set.insert(name, points);
        }
        set
    }
}

impl Serialize for ZoneSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, points) in &self.entries {
            map.serialize_entry(name, points)?;
        }
        map.end()
    }
}

struct ZoneSetVisitor;

impl<'de> Visitor<'de> for ZoneSetVisitor {
    type Value = ZoneSet;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a map of zone name to a list of {x, y} points")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ZoneSet, A::Error> {
        let mut set = ZoneSet::new();
        while let Some((name, points)) = access.next_entry::<String, Vec<Point>>()? {
            set.insert(name, points);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for ZoneSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ZoneSetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(offset: i32) -> Vec<Point> {
        vec![
            Point::new(offset, offset),
            Point::new(offset + 50, offset),
            Point::new(offset, offset + 50),
        ]
    }

    #[test]
    fn overwrite_keeps_position_and_count() {
        let mut set = ZoneSet::new();
        set.insert("door", tri(0));
        set.insert("bar", tri(100));
        let previous = set.insert("door", tri(200));

        assert_eq!(previous, Some(tri(0)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["door", "bar"]);
        assert_eq!(set.get("door"), Some(tri(200).as_slice()));
    }

    #[test]
    fn remove_and_clear() {
        let mut set: ZoneSet = [("a", tri(0)), ("b", tri(10))].into_iter().collect();
        assert!(set.remove("a").is_some());
        assert!(set.remove("a").is_none());
        assert!(!set.contains("a"));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn json_shape_preserves_document_order() {
        let raw = r#"{"zeta":[{"x":1,"y":2},{"x":3,"y":4},{"x":5,"y":0}],"alpha":[{"x":0,"y":0},{"x":9,"y":0},{"x":0,"y":9}]}"#;
        let set: ZoneSet = serde_json::from_str(raw).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), raw);
    }
}
