//! The data environment: template variables loaded from YAML.
//!
//! Template authors define their own keys, so the data is kept as a dynamic
//! [`serde_yaml::Value`] tree rather than a fixed schema. Only `lang` and
//! `title` are read by the library itself, when the document skeleton is
//! filled.

use crate::error::SheetgenError;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// A top-level mapping of template variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DataEnvironment {
    root: Mapping,
}

impl DataEnvironment {
    /// Parse YAML text. The document must be a mapping.
    ///
    /// Scalars follow YAML 1.2 rules: only `true`/`false` are booleans, so
    /// `no` or `off` stay strings.
    ///
    /// `origin` only labels errors (normally the data file path).
    pub fn from_yaml_str(text: &str, origin: &std::path::Path) -> Result<Self, SheetgenError> {
        let invalid = |e: serde_yaml::Error| SheetgenError::InvalidData {
            path: origin.to_path_buf(),
            detail: e.to_string(),
        };
        let mut value: Value = serde_yaml::from_str(text).map_err(invalid)?;
        // `<<: *anchor` merge keys stay literal unless applied.
        value.apply_merge().map_err(invalid)?;
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            other => Err(SheetgenError::DataNotAMapping {
                path: origin.to_path_buf(),
                found: type_name(&other),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Text of a scalar value the document skeleton cannot do without.
    ///
    /// Strings are returned verbatim; numbers and booleans in their YAML
    /// spelling. A missing key or `null` is [`SheetgenError::MissingKey`];
    /// sequences and mappings are [`SheetgenError::InvalidKey`].
    pub fn require_str(&self, key: &str) -> Result<String, SheetgenError> {
        let missing = || SheetgenError::MissingKey {
            key: key.to_string(),
        };
        match self.get(key).ok_or_else(missing)? {
            Value::Null => Err(missing()),
            Value::String(s) => Ok(s.clone()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Tagged(tagged) => match &tagged.value {
                Value::String(s) => Ok(s.clone()),
                other => Err(SheetgenError::InvalidKey {
                    key: key.to_string(),
                    found: type_name(other),
                }),
            },
            other => Err(SheetgenError::InvalidKey {
                key: key.to_string(),
                found: type_name(other),
            }),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn env(yaml: &str) -> DataEnvironment {
        DataEnvironment::from_yaml_str(yaml, Path::new("test.yaml")).unwrap()
    }

    #[test]
    fn nested_values_are_kept() {
        let data = env("lang: en\ntitle: Invoice\nitems:\n  - name: Widget\n    price: 3\n");
        assert_eq!(data.len(), 3);
        assert!(!data.is_empty());
        let items = data.get("items").unwrap().as_sequence().unwrap();
        assert_eq!(items[0]["name"].as_str(), Some("Widget"));
    }

    #[test]
    fn require_str_handles_scalars() {
        let data = env("lang: en\ntitle: 2024\nflag: true\n");
        assert_eq!(data.require_str("lang").unwrap(), "en");
        assert_eq!(data.require_str("title").unwrap(), "2024");
        assert_eq!(data.require_str("flag").unwrap(), "true");
    }

    #[test]
    fn require_str_missing_and_null() {
        let data = env("lang: en\ntitle: ~\n");
        assert!(matches!(
            data.require_str("title"),
            Err(SheetgenError::MissingKey { .. })
        ));
        assert!(matches!(
            data.require_str("nope"),
            Err(SheetgenError::MissingKey { .. })
        ));
    }

    #[test]
    fn require_str_rejects_collections() {
        let data = env("title: [a, b]\n");
        let err = data.require_str("title").unwrap_err();
        assert!(matches!(err, SheetgenError::InvalidKey { found: "a sequence", .. }));
    }

    #[test]
    fn top_level_must_be_a_mapping() {
        let err = DataEnvironment::from_yaml_str("- a\n- b\n", Path::new("list.yaml")).unwrap_err();
        assert!(matches!(err, SheetgenError::DataNotAMapping { found: "a sequence", .. }));

        let err = DataEnvironment::from_yaml_str("", Path::new("empty.yaml")).unwrap_err();
        assert!(matches!(err, SheetgenError::DataNotAMapping { found: "nothing", .. }));
    }

    #[test]
    fn merge_keys_are_resolved() {
        let data = env(
            "defaults: &sender\n  city: Paris\n  country: France\n\
             sender:\n  <<: *sender\n  name: Ann\n  city: Lyon\n",
        );
        let sender = data.get("sender").unwrap();
        assert_eq!(sender["name"].as_str(), Some("Ann"));
        assert_eq!(sender["country"].as_str(), Some("France"));
        assert_eq!(sender["city"].as_str(), Some("Lyon"));
        assert!(sender.get("<<").is_none());
    }

    #[test]
    fn bad_merge_target_is_invalid_data() {
        let err = DataEnvironment::from_yaml_str("sender:\n  <<: 3\n", Path::new("merge.yaml"))
            .unwrap_err();
        assert!(matches!(err, SheetgenError::InvalidData { .. }), "got: {err:?}");
    }

    #[test]
    fn yes_no_words_stay_strings() {
        let data = env("lang: en\ntitle: t\npaid: no\nshipped: false\n");
        assert_eq!(data.get("paid").unwrap().as_str(), Some("no"));
        assert_eq!(data.get("shipped").unwrap().as_bool(), Some(false));
    }

    #[test]
    fn malformed_yaml_is_invalid_data() {
        let err = DataEnvironment::from_yaml_str("title: [unclosed\n", Path::new("bad.yaml"))
            .unwrap_err();
        assert!(matches!(err, SheetgenError::InvalidData { .. }), "got: {err:?}");
        assert!(err.to_string().contains("bad.yaml"));
    }
}
