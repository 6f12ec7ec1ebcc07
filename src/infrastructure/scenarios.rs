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

//! Scenario templates embedded in the binary
//!
//! A scenario is an ordered list of templates rendered from the same values
//! map. Templates are applied in the order they are listed.

use crate::shared::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    /// Path of the scenario, e.g. `attach/hub`
    pub path: &'static str,
    pub templates: &'static [Template],
}

macro_rules! template {
    ($name:literal, $file:literal) => {
        Template {
            name: $name,
            content: include_str!(concat!("../../scenarios/", $file)),
        }
    };
}

pub const ATTACH_HUB: Scenario = Scenario {
    path: "attach/hub",
    templates: &[
        template!("namespace.yaml", "common/namespace.yaml"),
        template!("managed_cluster_cr.yaml", "attach/hub/managed_cluster_cr.yaml"),
        template!(
            "klusterlet_addon_config_cr.yaml",
            "attach/hub/klusterlet_addon_config_cr.yaml"
        ),
        template!("auto_import_secret.yaml", "attach/hub/auto_import_secret.yaml"),
    ],
};

pub const CREATE_HUB_COMMON: Scenario = Scenario {
    path: "create/hub/common",
    templates: &[
        template!("namespace.yaml", "common/namespace.yaml"),
        template!("cluster_image_set.yaml", "create/hub/common/cluster_image_set.yaml"),
        template!("pull_secret.yaml", "create/hub/common/pull_secret.yaml"),
        template!(
            "ssh_private_key_secret.yaml",
            "create/hub/common/ssh_private_key_secret.yaml"
        ),
        template!("managed_cluster_cr.yaml", "create/hub/common/managed_cluster_cr.yaml"),
        template!(
            "klusterlet_addon_config_cr.yaml",
            "create/hub/common/klusterlet_addon_config_cr.yaml"
        ),
    ],
};

pub const CREATE_HUB_AWS: Scenario = Scenario {
    path: "create/hub/aws",
    templates: &[
        template!("creds_secret.yaml", "create/hub/aws/creds_secret.yaml"),
        template!("install_config_secret.yaml", "create/hub/aws/install_config_secret.yaml"),
        template!("cluster_deployment_cr.yaml", "create/hub/aws/cluster_deployment_cr.yaml"),
        template!("machine_pool_cr.yaml", "create/hub/aws/machine_pool_cr.yaml"),
    ],
};

pub const CREATE_HUB_AZURE: Scenario = Scenario {
    path: "create/hub/azure",
    templates: &[
        template!("creds_secret.yaml", "create/hub/azure/creds_secret.yaml"),
        template!(
            "install_config_secret.yaml",
            "create/hub/azure/install_config_secret.yaml"
        ),
        template!(
            "cluster_deployment_cr.yaml",
            "create/hub/azure/cluster_deployment_cr.yaml"
        ),
        template!("machine_pool_cr.yaml", "create/hub/azure/machine_pool_cr.yaml"),
    ],
};

pub const CREATE_HUB_GCP: Scenario = Scenario {
    path: "create/hub/gcp",
    templates: &[
        template!("creds_secret.yaml", "create/hub/gcp/creds_secret.yaml"),
        template!("install_config_secret.yaml", "create/hub/gcp/install_config_secret.yaml"),
        template!("cluster_deployment_cr.yaml", "create/hub/gcp/cluster_deployment_cr.yaml"),
        template!("machine_pool_cr.yaml", "create/hub/gcp/machine_pool_cr.yaml"),
    ],
};

pub const CREATE_HUB_VSPHERE: Scenario = Scenario {
    path: "create/hub/vsphere",
    templates: &[
        template!("creds_secret.yaml", "create/hub/vsphere/creds_secret.yaml"),
        template!(
            "install_config_secret.yaml",
            "create/hub/vsphere/install_config_secret.yaml"
        ),
        template!(
            "cluster_deployment_cr.yaml",
            "create/hub/vsphere/cluster_deployment_cr.yaml"
        ),
        template!("machine_pool_cr.yaml", "create/hub/vsphere/machine_pool_cr.yaml"),
    ],
};

/// Sample values files for `cm attach cluster`
pub const ATTACH_SAMPLE_VALUES: &[Template] = &[
    template!("values-local-cluster.yaml", "values/attach-local-cluster.yaml"),
    template!("values-kubeconfig.yaml", "values/attach-kubeconfig.yaml"),
    template!("values-token.yaml", "values/attach-token.yaml"),
];

/// Sample values files for `cm create cluster`
pub const CREATE_SAMPLE_VALUES: &[Template] = &[
    template!("values-aws.yaml", "values/create-aws.yaml"),
    template!("values-azure.yaml", "values/create-azure.yaml"),
    template!("values-gcp.yaml", "values/create-gcp.yaml"),
    template!("values-vsphere.yaml", "values/create-vsphere.yaml"),
];

/// Write the raw templates of `scenarios` under `dir/<scenario path>/` and the
/// sample values files directly under `dir`. Returns the written paths.
pub fn export_templates(
    scenarios: &[&Scenario],
    samples: &[Template],
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for scenario in scenarios {
        let scenario_dir = dir.join(scenario.path);
        fs::create_dir_all(&scenario_dir)?;
        for template in scenario.templates {
            let path = scenario_dir.join(template.name);
            fs::write(&path, template.content)?;
            written.push(path);
        }
    }

    if !samples.is_empty() {
        fs::create_dir_all(dir)?;
    }
    for sample in samples {
        let path = dir.join(sample.name);
        fs::write(&path, sample.content)?;
        written.push(path);
    }

    tracing::info!(count = written.len(), dir = %dir.display(), "templates exported");
    Ok(written)
}
