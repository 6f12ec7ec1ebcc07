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

use crate::domain::cluster::import::{wait_for_import_secret, write_import_file};
use crate::domain::cluster::validator::resolve_cluster_name;
use crate::domain::options::{RunReport, ScenarioOptions};
use crate::domain::values::Values;
use crate::infrastructure::applier::Applier;
use crate::infrastructure::constants::{CREATE_COMMON_KEYS, KEY_CLOUD};
use crate::infrastructure::kubernetes::HubClient;
use crate::infrastructure::scenarios::{
    export_templates, Scenario, CREATE_HUB_AWS, CREATE_HUB_AZURE, CREATE_HUB_COMMON,
    CREATE_HUB_GCP, CREATE_HUB_VSPHERE, CREATE_SAMPLE_VALUES,
};
use crate::shared::error::{CmError, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
    Vsphere,
}

impl CloudProvider {
    pub const ALL: [CloudProvider; 4] = [
        CloudProvider::Aws,
        CloudProvider::Azure,
        CloudProvider::Gcp,
        CloudProvider::Vsphere,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::Gcp => "gcp",
            CloudProvider::Vsphere => "vsphere",
        }
    }

    pub fn scenario(&self) -> &'static Scenario {
        match self {
            CloudProvider::Aws => &CREATE_HUB_AWS,
            CloudProvider::Azure => &CREATE_HUB_AZURE,
            CloudProvider::Gcp => &CREATE_HUB_GCP,
            CloudProvider::Vsphere => &CREATE_HUB_VSPHERE,
        }
    }

    /// Keys the provider section (`aws:`, `azure:`, ...) must define.
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            CloudProvider::Aws => &["awsAccessKeyID", "awsSecretAccessKey", "region"],
            CloudProvider::Azure => &[
                "baseDomainResourceGroupName",
                "clientID",
                "clientSecret",
                "tenantID",
                "subscriptionID",
                "region",
            ],
            CloudProvider::Gcp => &["projectID", "serviceAccountJSON", "region"],
            CloudProvider::Vsphere => &[
                "username",
                "password",
                "vcenter",
                "cacertificate",
                "cluster",
                "datacenter",
                "defaultDatastore",
                "network",
                "apiVIP",
                "ingressVIP",
            ],
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CloudProvider {
    type Err = CmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aws" => Ok(CloudProvider::Aws),
            "azure" => Ok(CloudProvider::Azure),
            "gcp" => Ok(CloudProvider::Gcp),
            "vsphere" => Ok(CloudProvider::Vsphere),
            _ => Err(CmError::validation(format!(
                "unsupported cloud '{}', supported clouds are aws, azure, gcp, vsphere",
                s
            ))),
        }
    }
}

/// `cm create cluster`
#[derive(Debug, Clone, Default)]
pub struct CreateClusterOptions {
    pub scenario: ScenarioOptions,
    pub values: Values,
    pub cluster_name: Option<String>,
    /// Where to write the import manifests once the cluster is provisioned
    pub import_file: Option<PathBuf>,
    /// Resolved by `validate`
    pub cloud: Option<CloudProvider>,
}

impl CreateClusterOptions {
    pub fn complete(&mut self) -> Result<()> {
        if self.scenario.exports_templates() {
            return Ok(());
        }
        self.values = self.scenario.load_values()?;
        Ok(())
    }

    pub fn validate(&mut self) -> Result<()> {
        if self.scenario.exports_templates() {
            return Ok(());
        }

        let name = resolve_cluster_name(self.cluster_name.as_deref(), &mut self.values)?;
        self.cluster_name = Some(name);

        let cloud = self.cloud_from_values()?;

        let mut missing: Vec<String> = self
            .values
            .missing_keys(None, CREATE_COMMON_KEYS)
            .into_iter()
            .map(str::to_string)
            .collect();
        missing.extend(
            self.values
                .missing_keys(Some(cloud.as_str()), cloud.required_keys())
                .into_iter()
                .map(|key| format!("{}.{}", cloud, key)),
        );

        if !missing.is_empty() {
            return Err(CmError::validation(format!(
                "missing required values: {}",
                missing.join(", ")
            )));
        }

        self.cloud = Some(cloud);
        Ok(())
    }

    pub async fn run_with_client(&self, client: &dyn HubClient) -> Result<RunReport> {
        if let Some(dir) = &self.scenario.out_templates_dir {
            let mut scenarios = vec![&CREATE_HUB_COMMON];
            scenarios.extend(CloudProvider::ALL.iter().map(CloudProvider::scenario));
            let exported = export_templates(&scenarios, CREATE_SAMPLE_VALUES, dir)?;
            return Ok(RunReport::exported(exported));
        }

        // Objects are rendered and the import secret is polled under the same name
        let mut values = self.values.clone();
        let cluster_name = resolve_cluster_name(self.cluster_name.as_deref(), &mut values)?;
        let cloud = match self.cloud {
            Some(cloud) => cloud,
            None => self.cloud_from_values()?,
        };
        let applier = Applier::new(client);

        if self.scenario.dry_run {
            let mut manifests = applier
                .processor()
                .render_scenario(&CREATE_HUB_COMMON, &values)?;
            manifests.extend(
                applier
                    .processor()
                    .render_scenario(cloud.scenario(), &values)?,
            );
            return Ok(RunReport::dry_run(manifests));
        }

        let mut manifests = applier
            .create_or_update_scenario(&CREATE_HUB_COMMON, &values)
            .await?;
        manifests.extend(
            applier
                .create_or_update_scenario(cloud.scenario(), &values)
                .await?,
        );
        info!(cluster = %cluster_name, %cloud, "cluster creation submitted");

        if let Some(path) = &self.import_file {
            let secret =
                wait_for_import_secret(client, &cluster_name, self.scenario.timeout()).await?;
            write_import_file(path, &secret)?;
        }

        Ok(RunReport {
            manifests,
            applied: true,
            import_file: self.import_file.clone(),
            exported_templates: Vec::new(),
        })
    }

    fn cloud_from_values(&self) -> Result<CloudProvider> {
        self.values
            .non_empty_str(KEY_CLOUD)
            .ok_or_else(|| CmError::validation(format!("{} is missing", KEY_CLOUD)))?
            .parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_provider_from_str() {
        assert_eq!("aws".parse::<CloudProvider>().unwrap(), CloudProvider::Aws);
        assert_eq!(
            "vsphere".parse::<CloudProvider>().unwrap(),
            CloudProvider::Vsphere
        );
        assert!("AWS".parse::<CloudProvider>().is_err());
        assert!("openstack".parse::<CloudProvider>().is_err());
    }

    #[test]
    fn test_cloud_provider_scenarios() {
        for cloud in CloudProvider::ALL {
            assert!(cloud.scenario().path.ends_with(cloud.as_str()));
            assert!(!cloud.required_keys().is_empty());
        }
    }
}
