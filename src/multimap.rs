use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Iter as MapIter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered collection of string keys, each bound to an ordered list of
/// string values: the shape of URL query parameters.
///
/// Equality ignores key order but not value order.
///
/// ```
/// use qs_form::Multimap;
///
/// let mut map = Multimap::new();
/// map.append("tag", "a");
/// map.append("tag", "b");
/// map.append("page", "2");
///
/// assert_eq!(map.first("tag"), Some("a"));
/// assert_eq!(map.get("tag").map(<[String]>::len), Some(2));
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["tag", "page"]);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Multimap(IndexMap<String, Vec<String>>);

impl Multimap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Multimap(IndexMap::with_capacity(capacity))
    }

    /// All values bound to `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// The first value bound to `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.first().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Appends `value` to the values bound to `key`, creating the key if
    /// needed.
    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        match self.0.get_mut(key) {
            Some(values) => values.push(value.into()),
            None => {
                self.0.insert(key.to_owned(), vec![value.into()]);
            }
        }
    }

    /// Binds `key` to exactly `values`, replacing anything bound before.
    /// An existing key keeps its position.
    pub fn set(&mut self, key: &str, values: Vec<String>) {
        match self.0.get_mut(key) {
            Some(existing) => *existing = values,
            None => {
                self.0.insert(key.to_owned(), values);
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.0.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter(self.0.iter())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Multimap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

/// Iterator over `(key, values)` pairs in insertion order.
pub struct Iter<'a>(MapIter<'a, String, Vec<String>>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [String]);

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> IntoIterator for &'a Multimap {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Appends each pair in order, so repeated keys collect multiple values.
impl<K, V> FromIterator<(K, V)> for Multimap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Multimap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for Multimap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.append(key.as_ref(), value);
        }
    }
}

impl From<IndexMap<String, Vec<String>>> for Multimap {
    fn from(map: IndexMap<String, Vec<String>>) -> Self {
        Multimap(map)
    }
}

impl From<Multimap> for IndexMap<String, Vec<String>> {
    fn from(map: Multimap) -> Self {
        map.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut map: Multimap = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(map.get("a"), Some(&["1".to_string(), "3".to_string()][..]));

        map.set("a", vec![]);
        assert_eq!(map.get("a"), Some(&[] as &[String]));
        assert_eq!(map.first("a"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn equality_ignores_key_order() {
        let left: Multimap = [("a", "1"), ("b", "2")].into_iter().collect();
        let right: Multimap = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(left, right);

        let reordered: Multimap = [("a", "2"), ("a", "1")].into_iter().collect();
        let original: Multimap = [("a", "1"), ("a", "2")].into_iter().collect();
        assert_ne!(reordered, original);
    }
}
