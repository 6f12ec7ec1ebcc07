// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The values map a scenario is rendered from

use crate::shared::error::{CmError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::read_to_string;
use std::path::Path;

/// String-keyed values loaded from a YAML file.
///
/// Command-line overrides are written into the same map, so templates only
/// ever see one source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Values(Map<String, Value>);

impl Values {
    /// Load values from a YAML file.
    ///
    /// A missing or unreadable file is a `FileError`, a file without any
    /// entries is `EmptyValues`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CmError::FileError(format!(
                "values file {} not found",
                path.display()
            )));
        }

        let content = read_to_string(path).map_err(|e| {
            CmError::FileError(format!(
                "failed to read values file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml_str(&content, &path.display().to_string())
    }

    /// Parse values from YAML text. `origin` names the source in errors.
    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(CmError::EmptyValues(format!("{} is empty", origin)));
        }

        let parsed: Value = serde_yaml::from_str(content).map_err(|e| {
            CmError::FileError(format!("failed to parse values file {}: {}", origin, e))
        })?;

        match parsed {
            Value::Null => Err(CmError::EmptyValues(format!("{} is empty", origin))),
            Value::Object(map) if map.is_empty() => {
                Err(CmError::EmptyValues(format!("{} is empty", origin)))
            }
            Value::Object(map) => Ok(Self(map)),
            _ => Err(CmError::FileError(format!(
                "values file {} must contain a mapping at the top level",
                origin
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// String value of `key`, treating an empty string as absent.
    pub fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.get_str(key).filter(|s| !s.is_empty())
    }

    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), Value::String(value.into()));
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Nested mapping stored under `key`, if any.
    pub fn section(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }

    /// Keys of `required` that are absent or empty, either at the top level
    /// or inside the `section` mapping.
    pub fn missing_keys<'a>(&self, section: Option<&str>, required: &[&'a str]) -> Vec<&'a str> {
        let map = match section {
            Some(name) => match self.section(name) {
                Some(map) => map,
                None => return required.to_vec(),
            },
            None => &self.0,
        };

        required
            .iter()
            .copied()
            .filter(|key| !is_present(map.get(*key)))
            .collect()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

impl From<Map<String, Value>> for Values {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_mapping() {
        let values = Values::from_yaml_str(
            "managedClusterName: test\nserver: https://api.test:6443\n",
            "inline",
        )
        .unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get_str("managedClusterName"), Some("test"));
    }

    #[test]
    fn test_empty_content() {
        assert!(matches!(
            Values::from_yaml_str("", "inline"),
            Err(CmError::EmptyValues(_))
        ));
        assert!(matches!(
            Values::from_yaml_str("{}", "inline"),
            Err(CmError::EmptyValues(_))
        ));
    }

    #[test]
    fn test_non_mapping_root() {
        assert!(matches!(
            Values::from_yaml_str("- a\n- b\n", "inline"),
            Err(CmError::FileError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Values::from_file("does-not-exist.yaml"),
            Err(CmError::FileError(_))
        ));
    }

    #[test]
    fn test_non_empty_str() {
        let values: Values = [("token", json!("")), ("server", json!("s"))]
            .into_iter()
            .collect();
        assert_eq!(values.non_empty_str("token"), None);
        assert_eq!(values.non_empty_str("server"), Some("s"));
    }

    #[test]
    fn test_missing_keys() {
        let values: Values = [
            ("ocpImage", json!("quay.io/ocp:4.6")),
            ("baseDomain", json!("")),
            ("aws", json!({"region": "us-east-1"})),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            values.missing_keys(None, &["ocpImage", "baseDomain"]),
            vec!["baseDomain"]
        );
        assert_eq!(
            values.missing_keys(Some("aws"), &["region", "awsAccessKeyID"]),
            vec!["awsAccessKeyID"]
        );
        assert_eq!(
            values.missing_keys(Some("gcp"), &["projectID"]),
            vec!["projectID"]
        );
    }
}
