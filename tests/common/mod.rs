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

//! In-memory hub used by the integration tests

#![allow(dead_code)]

use cm_cli::{CmError, HubClient, Manifest};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeHubClient {
    applied: Mutex<Vec<Manifest>>,
    secrets: Mutex<HashMap<(String, String), Secret>>,
    secret_reads: Mutex<u32>,
    /// Fail every Secret read with this message
    get_secret_error: Option<String>,
}

impl FakeHubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_get_secret(message: &str) -> Self {
        Self {
            get_secret_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn with_secret(self, namespace: &str, name: &str, data: &[(&str, &str)]) -> Self {
        let data: BTreeMap<String, ByteString> = data
            .iter()
            .map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec())))
            .collect();
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            data: Some(data),
            ..Default::default()
        };
        self.secrets
            .lock()
            .unwrap()
            .insert((namespace.to_string(), name.to_string()), secret);
        self
    }

    pub fn applied(&self) -> Vec<Manifest> {
        self.applied.lock().unwrap().clone()
    }

    pub fn applied_kinds(&self) -> Vec<String> {
        self.applied().into_iter().map(|m| m.kind).collect()
    }

    pub fn secret_reads(&self) -> u32 {
        *self.secret_reads.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl HubClient for FakeHubClient {
    async fn apply_manifest(&self, manifest: &Manifest) -> Result<(), CmError> {
        self.applied.lock().unwrap().push(manifest.clone());
        Ok(())
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, CmError> {
        *self.secret_reads.lock().unwrap() += 1;
        if let Some(message) = &self.get_secret_error {
            return Err(CmError::KubeError(message.clone()));
        }
        self.secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| CmError::not_found("Secret", name, namespace))
    }
}

pub fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

pub fn sample_values(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios/values")
        .join(name)
}
