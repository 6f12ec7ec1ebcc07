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

use crate::shared::error::{CmError, Result};
use serde_json::Value;
use std::fmt;

/// One object rendered from a scenario template
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
    pub body: Value,
    /// Template the object was rendered from, e.g. `attach/hub/namespace.yaml`
    pub source: String,
}

impl Manifest {
    pub fn from_value(body: Value, source: &str) -> Result<Self> {
        let field = |pointer: &str| {
            body.pointer(pointer)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let missing = |what: &str| {
            CmError::TemplateError(format!("{}: rendered object is missing {}", source, what))
        };

        let api_version = field("/apiVersion").ok_or_else(|| missing("apiVersion"))?;
        let kind = field("/kind").ok_or_else(|| missing("kind"))?;
        let name = field("/metadata/name").ok_or_else(|| missing("metadata.name"))?;
        let namespace = field("/metadata/namespace");

        Ok(Self {
            api_version,
            kind,
            name,
            namespace,
            body,
            source: source.to_string(),
        })
    }

    /// Split `apiVersion` into (group, version); the core group is empty.
    pub fn group_version(&self) -> (String, String) {
        parse_api_version(&self.api_version)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.body)?)
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{} {}/{}", self.kind, ns, self.name),
            None => write!(f, "{} {}", self.kind, self.name),
        }
    }
}

pub fn parse_api_version(api_version: &str) -> (String, String) {
    match api_version.split_once('/') {
        Some((group, version)) => (group.to_string(), version.to_string()),
        None => (String::new(), api_version.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let manifest = Manifest::from_value(
            json!({
                "apiVersion": "v1",
                "kind": "Secret",
                "metadata": {"name": "auto-import-secret", "namespace": "c1"}
            }),
            "attach/hub/auto_import_secret.yaml",
        )
        .unwrap();

        assert_eq!(manifest.kind, "Secret");
        assert_eq!(manifest.namespace.as_deref(), Some("c1"));
        assert_eq!(manifest.to_string(), "Secret c1/auto-import-secret");
    }

    #[test]
    fn test_missing_name() {
        let err = Manifest::from_value(
            json!({"apiVersion": "v1", "kind": "Namespace", "metadata": {}}),
            "x.yaml",
        )
        .unwrap_err();
        assert!(err.to_string().contains("metadata.name"));
    }

    #[test]
    fn test_parse_api_version() {
        assert_eq!(
            parse_api_version("hive.openshift.io/v1"),
            ("hive.openshift.io".to_string(), "v1".to_string())
        );
        assert_eq!(parse_api_version("v1"), (String::new(), "v1".to_string()));
    }
}
