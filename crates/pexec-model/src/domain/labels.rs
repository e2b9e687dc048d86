use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Set of `key=value` labels used to select instances.
///
/// Keys are unique and kept sorted, so the rendered selector is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse a `key1=value1,key2=value2` selector.
    ///
    /// Whitespace around keys and values is trimmed and empty segments are skipped.
    /// A segment without `=`, with an empty key, or repeating an earlier key is rejected.
    pub fn parse(input: &str) -> Result<Self, ModelError> {
        let mut labels = BTreeMap::new();
        for segment in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let Some((key, value)) = segment.split_once('=') else {
                return Err(ModelError::InvalidLabel {
                    segment: segment.to_string(),
                    reason: "expected key=value",
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(ModelError::InvalidLabel {
                    segment: segment.to_string(),
                    reason: "empty key",
                });
            }
            match labels.entry(key.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(value.trim().to_string());
                }
                Entry::Occupied(_) => {
                    return Err(ModelError::InvalidLabel {
                        segment: segment.to_string(),
                        reason: "duplicate key",
                    });
                }
            }
        }
        Ok(Self(labels))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as an equality-based label selector.
    ///
    /// An empty set renders as an empty string, which matches every instance.
    pub fn to_selector(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_selector())
    }
}

impl<K, V> FromIterator<(K, V)> for LabelSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<BTreeMap<String, String>> for LabelSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_trims() {
        let labels = LabelSet::parse(" app = nginx , tier=web ").unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("app"), Some("nginx"));
        assert_eq!(labels.get("tier"), Some("web"));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let labels = LabelSet::parse("app=nginx,,").unwrap();
        assert_eq!(labels.len(), 1);
        assert!(LabelSet::parse("").unwrap().is_empty());
    }

    #[test]
    fn empty_value_is_allowed() {
        let labels = LabelSet::parse("canary=").unwrap();
        assert_eq!(labels.get("canary"), Some(""));
    }

    #[test]
    fn rejects_malformed_segments() {
        assert!(matches!(
            LabelSet::parse("app"),
            Err(ModelError::InvalidLabel { reason: "expected key=value", .. })
        ));
        assert!(matches!(
            LabelSet::parse("=nginx"),
            Err(ModelError::InvalidLabel { reason: "empty key", .. })
        ));
        assert!(matches!(
            LabelSet::parse("app=a,app=b"),
            Err(ModelError::InvalidLabel { reason: "duplicate key", .. })
        ));
    }

    #[test]
    fn selector_is_sorted_by_key() {
        let labels: LabelSet = [("tier", "web"), ("app", "nginx")].into_iter().collect();
        assert_eq!(labels.to_selector(), "app=nginx,tier=web");
    }

    #[test]
    fn empty_set_renders_empty_selector() {
        assert_eq!(LabelSet::new().to_selector(), "");
    }
}
