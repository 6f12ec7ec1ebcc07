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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, CmError>;

#[derive(Error, Debug)]
pub enum CmError {
    #[error("Kubernetes API error: {0}")]
    KubeError(String),

    #[error("File error: {0}")]
    FileError(String),

    #[error("Values are missing: {0}")]
    EmptyValues(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Resource not found: {resource_type} '{name}' in namespace '{namespace}'")]
    NotFound {
        resource_type: String,
        name: String,
        namespace: String,
    },

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

impl CmError {
    pub fn validation(context: impl Into<String>) -> Self {
        Self::ValidationError(context.into())
    }

    pub fn not_found(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_missing() -> Result<String> {
        Ok(std::fs::read_to_string("/nonexistent/cm-cli/values.yaml")?)
    }

    fn parse_invalid() -> Result<serde_yaml::Value> {
        Ok(serde_yaml::from_str("a: [unclosed")?)
    }

    #[test]
    fn test_from_conversions() {
        assert!(matches!(read_missing(), Err(CmError::Io(_))));
        assert!(matches!(parse_invalid(), Err(CmError::YamlParse(_))));
    }

    #[test]
    fn test_not_found() {
        let err = CmError::not_found("Secret", "c1-import", "c1");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("c1-import"));
        assert!(!CmError::validation("bad").is_not_found());
    }
}
