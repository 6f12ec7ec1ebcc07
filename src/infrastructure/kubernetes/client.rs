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

use crate::infrastructure::applier::Manifest;
use crate::infrastructure::constants::FIELD_MANAGER;
use crate::shared::error::CmError;
use k8s_openapi::api::core::v1::Secret;
use kube::api::{Api, DynamicObject, GroupVersionKind, Patch, PatchParams};
use kube::discovery::{pinned_kind, Scope};
use kube::{Client, ResourceExt};

/// The hub operations cm needs
#[async_trait::async_trait]
pub trait HubClient: Send + Sync {
    /// Create or update `manifest` on the hub.
    async fn apply_manifest(&self, manifest: &Manifest) -> Result<(), CmError>;

    /// Read a Secret; a missing Secret is `CmError::NotFound`.
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, CmError>;
}

pub struct HubClientImpl {
    client: Client,
}

impl HubClientImpl {
    pub async fn new() -> Result<Self, CmError> {
        let client = Client::try_default().await.map_err(|e| {
            CmError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client })
    }

    pub async fn new_with_config(
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self, CmError> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        if kubeconfig_path.is_none() && context.is_none() {
            return Self::new().await;
        }

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path)
                .map_err(|e| CmError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        } else {
            Kubeconfig::read()
                .map_err(|e| CmError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                CmError::KubeError(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            CmError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HubClient for HubClientImpl {
    async fn apply_manifest(&self, manifest: &Manifest) -> Result<(), CmError> {
        let (group, version) = manifest.group_version();
        let gvk = GroupVersionKind::gvk(&group, &version, &manifest.kind);

        let (resource, capabilities) = pinned_kind(&self.client, &gvk).await.map_err(|e| {
            CmError::KubeError(format!(
                "Failed to resolve {} {}: {}",
                manifest.api_version, manifest.kind, e
            ))
        })?;

        let api: Api<DynamicObject> = match (&capabilities.scope, &manifest.namespace) {
            (Scope::Namespaced, Some(ns)) => {
                Api::namespaced_with(self.client.clone(), ns, &resource)
            }
            (Scope::Namespaced, None) => {
                Api::default_namespaced_with(self.client.clone(), &resource)
            }
            (Scope::Cluster, _) => Api::all_with(self.client.clone(), &resource),
        };

        let patch_params = PatchParams::apply(FIELD_MANAGER).force();
        let applied = api
            .patch(&manifest.name, &patch_params, &Patch::Apply(&manifest.body))
            .await
            .map_err(|e| CmError::KubeError(format!("Failed to apply {}: {}", manifest, e)))?;

        let resource_version = applied.resource_version().unwrap_or_default();
        tracing::debug!(object = %manifest, %resource_version, "applied");
        Ok(())
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, CmError> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        api.get(name).await.map_err(|e| {
            if let kube::Error::Api(ae) = e {
                if ae.code == 404 {
                    CmError::not_found("Secret", name, namespace)
                } else {
                    CmError::KubeError(ae.message)
                }
            } else {
                CmError::KubeError(e.to_string())
            }
        })
    }
}

/// Stand-in for runs that never reach the hub (template export, dry run).
/// Any call is an error.
pub struct OfflineHubClient;

#[async_trait::async_trait]
impl HubClient for OfflineHubClient {
    async fn apply_manifest(&self, manifest: &Manifest) -> Result<(), CmError> {
        Err(CmError::KubeError(format!(
            "cannot apply {} without a hub connection",
            manifest
        )))
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, CmError> {
        Err(CmError::KubeError(format!(
            "cannot read Secret {}/{} without a hub connection",
            namespace, name
        )))
    }
}
