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

use crate::domain::values::Values;
use crate::infrastructure::constants::{DNS1123_LABEL_MAX_LENGTH, KEY_MANAGED_CLUSTER_NAME};
use crate::shared::error::{CmError, Result};
use regex::Regex;
use std::fs::read_to_string;
use std::path::Path;

/// How a non-local cluster hands its credentials to the hub.
/// `local-cluster` needs none and never reaches this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachMode {
    KubeConfig,
    Token,
}

/// Managed cluster names become namespace names on the hub.
pub fn validate_cluster_name(name: &str) -> Result<()> {
    let re = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$")
        .map_err(|e| CmError::validation(e.to_string()))?;

    if name.len() > DNS1123_LABEL_MAX_LENGTH || !re.is_match(name) {
        return Err(CmError::validation(format!(
            "invalid cluster name '{}': must be a DNS-1123 label (lowercase alphanumerics and '-', at most {} characters)",
            name, DNS1123_LABEL_MAX_LENGTH
        )));
    }
    Ok(())
}

/// Resolve the managed cluster name: `cli_name` wins over
/// `managedClusterName` from the values. The result is written back into
/// the values so templates render it.
pub fn resolve_cluster_name(cli_name: Option<&str>, values: &mut Values) -> Result<String> {
    let name = match cli_name.filter(|s| !s.is_empty()) {
        Some(name) => name.to_string(),
        None => match values.get(KEY_MANAGED_CLUSTER_NAME) {
            None | Some(serde_json::Value::Null) => {
                return Err(CmError::validation(format!(
                    "cluster name is missing (use --name or set {})",
                    KEY_MANAGED_CLUSTER_NAME
                )))
            }
            Some(value) => value
                .as_str()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    CmError::validation(format!(
                        "{} must be a non-empty string",
                        KEY_MANAGED_CLUSTER_NAME
                    ))
                })?
                .to_string(),
        },
    };

    validate_cluster_name(&name)?;
    values.set_str(KEY_MANAGED_CLUSTER_NAME, name.clone());
    Ok(name)
}

/// A non-local cluster needs exactly one of a kubeconfig or a token and
/// server pair.
pub fn validate_credentials(
    kubeconfig: Option<&str>,
    server: Option<&str>,
    token: Option<&str>,
) -> Result<AttachMode> {
    match (kubeconfig, server, token) {
        (Some(_), None, None) => Ok(AttachMode::KubeConfig),
        (None, Some(_), Some(_)) => Ok(AttachMode::Token),
        (Some(_), _, _) => Err(CmError::validation(
            "kubeConfig and server/token are mutually exclusive",
        )),
        (None, Some(_), None) => Err(CmError::validation("token is missing for server")),
        (None, None, Some(_)) => Err(CmError::validation("server is missing for token")),
        (None, None, None) => Err(CmError::validation(
            "either kubeConfig or token/server must be provided",
        )),
    }
}

/// A kubeconfig may be given inline or as a path; paths are replaced by the
/// file content.
pub fn resolve_kubeconfig(kubeconfig: &str) -> Result<String> {
    let path = Path::new(kubeconfig);
    if !path.is_file() {
        return Ok(kubeconfig.to_string());
    }

    read_to_string(path).map_err(|e| {
        CmError::FileError(format!(
            "failed to read kubeconfig {}: {}",
            path.display(),
            e
        ))
    })
}
