use indexmap::IndexMap;

/// Multi-valued parameter map, the shape of a decoded URL query string.
///
/// Keys keep the order they were first inserted in, values keep the order
/// they were appended in. The decoder only reads from it.
///
/// Parsing the raw query string is left to the caller:
///
/// ```ignore
/// let params: ParamMap = url::form_urlencoded::parse(query.as_bytes()).collect();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: IndexMap<String, Vec<String>>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Map holding exactly one key with one value.
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = Self::new();
        params.append(key, value);
        params
    }

    /// Add `value` to the values of `key`, creating the key if needed.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// Replace all values of `key`. A new key goes last, an existing one
    /// keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.entries.insert(key.into(), values);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// First value of `key`. A key without values reads as absent.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether any key starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.entries.keys().any(|k| k.starts_with(prefix))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ParamMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.append(key, value);
        }
    }
}

impl From<Vec<(String, Vec<String>)>> for ParamMap {
    fn from(entries: Vec<(String, Vec<String>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_groups_values_under_first_occurrence() {
        let params: ParamMap = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some(&["1".to_string(), "3".to_string()][..]));
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn first_treats_empty_value_list_as_absent() {
        let mut params = ParamMap::new();
        params.insert("a", Vec::new());
        assert!(params.contains_key("a"));
        assert_eq!(params.first("a"), None);
    }

    #[test]
    fn insert_replaces_values_in_place() {
        let mut params: ParamMap = [("a", "1"), ("b", "2")].into_iter().collect();
        params.insert("a", vec!["3".to_string()]);
        params.insert("c", Vec::new());
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(params.first("a"), Some("3"));
    }

    #[test]
    fn many_distinct_keys_stay_addressable() {
        let params: ParamMap = (0..50_000).map(|i| (format!("k{i}"), i.to_string())).collect();
        assert_eq!(params.len(), 50_000);
        assert_eq!(params.first("k49999"), Some("49999"));
        assert!(params.has_prefix("k1"));
        assert!(!params.has_prefix("x"));
    }
}
