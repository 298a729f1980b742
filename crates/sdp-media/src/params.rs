//! Ordered parameter lists
//!
//! A [`ParamList`] is an ordered sequence of `(name, value)` pairs in which a
//! name may repeat. It backs the local/remote attribute stores, the format
//! parameter store, transport events and the exported media view.

use serde::{Deserialize, Serialize};

/// Ordered multimap of named string parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamList {
    params: Vec<(String, String)>,
}

impl ParamList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, keeping any existing entries with the same name
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.push((name.into(), value.into()));
    }

    /// Set a parameter to a single value.
    ///
    /// The first entry with this name keeps its position and takes the new
    /// value; any later duplicates are dropped. Appends when absent.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.params.iter().position(|(n, _)| *n == name) {
            Some(first) => {
                self.params[first].1 = value;
                let mut idx = 0;
                self.params.retain(|(n, _)| {
                    let keep = idx <= first || *n != name;
                    idx += 1;
                    keep
                });
            }
            None => self.params.push((name, value)),
        }
    }

    /// Remove every entry with this name, returning how many were removed
    pub fn clear(&mut self, name: &str) -> usize {
        let before = self.params.len();
        self.params.retain(|(n, _)| n != name);
        before - self.params.len()
    }

    /// Value of the first entry with this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Values of every entry with this name, in insertion order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.iter().any(|(n, _)| n == name)
    }

    /// Iterate over all `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Append every entry of `src`, with `prefix` prepended to each name
    pub fn extend_prefixed(&mut self, src: &ParamList, prefix: &str) {
        self.params.extend(
            src.params
                .iter()
                .map(|(n, v)| (format!("{}{}", prefix, n), v.clone())),
        );
    }
}

impl<K, V> FromIterator<(K, V)> for ParamList
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_duplicates() {
        let mut list = ParamList::new();
        list.add("k", "v1");
        list.add("other", "x");
        list.add("k", "v2");

        assert_eq!(list.len(), 3);
        assert_eq!(list.get("k"), Some("v1"));
        assert_eq!(list.get_all("k").collect::<Vec<_>>(), vec!["v1", "v2"]);
    }

    #[test]
    fn test_set_collapses_duplicates_in_place() {
        let mut list: ParamList = [("a", "1"), ("k", "v1"), ("b", "2"), ("k", "v2")]
            .into_iter()
            .collect();
        list.set("k", "v3");

        let pairs: Vec<_> = list.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("k", "v3"), ("b", "2")]);
    }

    #[test]
    fn test_set_appends_when_absent() {
        let mut list = ParamList::new();
        list.set("k", "v");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![("k", "v")]);
    }

    #[test]
    fn test_clear() {
        let mut list: ParamList = [("k", "1"), ("x", "2"), ("k", "3")].into_iter().collect();
        assert_eq!(list.clear("k"), 2);
        assert_eq!(list.clear("k"), 0);
        assert!(!list.contains("k"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_extend_prefixed() {
        let src: ParamList = [("ptime", "20"), ("sendrecv", "")].into_iter().collect();
        let mut dst = ParamList::new();
        dst.add("media", "yes");
        dst.extend_prefixed(&src, "sdp_");

        let keys: Vec<_> = dst.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["media", "sdp_ptime", "sdp_sendrecv"]);
    }
}
