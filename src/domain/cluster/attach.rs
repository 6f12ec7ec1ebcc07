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
use crate::domain::cluster::validator::{
    resolve_cluster_name, resolve_kubeconfig, validate_credentials, AttachMode,
};
use crate::domain::options::{non_empty, RunReport, ScenarioOptions};
use crate::domain::values::Values;
use crate::infrastructure::applier::Applier;
use crate::infrastructure::constants::{
    KEY_KUBECONFIG, KEY_SERVER, KEY_TOKEN, LOCAL_CLUSTER_NAME,
};
use crate::infrastructure::kubernetes::HubClient;
use crate::infrastructure::scenarios::{export_templates, ATTACH_HUB, ATTACH_SAMPLE_VALUES};
use crate::shared::error::Result;
use std::path::PathBuf;
use tracing::info;

/// `cm attach cluster`
#[derive(Debug, Clone, Default)]
pub struct AttachClusterOptions {
    pub scenario: ScenarioOptions,
    pub values: Values,
    pub cluster_name: Option<String>,
    pub cluster_server: Option<String>,
    pub cluster_token: Option<String>,
    pub cluster_kubeconfig: Option<String>,
    /// Where to write the import manifests
    pub import_file: Option<PathBuf>,
}

impl AttachClusterOptions {
    /// Load the values file and apply the credential flags on top of it.
    pub fn complete(&mut self) -> Result<()> {
        if self.scenario.exports_templates() {
            return Ok(());
        }

        self.values = self.scenario.load_values()?;

        for (key, flag) in [
            (KEY_KUBECONFIG, &self.cluster_kubeconfig),
            (KEY_SERVER, &self.cluster_server),
            (KEY_TOKEN, &self.cluster_token),
        ] {
            if let Some(value) = non_empty(flag) {
                self.values.set_str(key, value);
            }
        }
        Ok(())
    }

    pub fn validate(&mut self) -> Result<()> {
        if self.scenario.exports_templates() {
            return Ok(());
        }

        let name = resolve_cluster_name(self.cluster_name.as_deref(), &mut self.values)?;
        self.cluster_name = Some(name.clone());

        if name == LOCAL_CLUSTER_NAME {
            return Ok(());
        }

        let kubeconfig = non_empty(&self.cluster_kubeconfig)
            .or_else(|| self.values.non_empty_str(KEY_KUBECONFIG))
            .map(str::to_string);
        let server = non_empty(&self.cluster_server)
            .or_else(|| self.values.non_empty_str(KEY_SERVER))
            .map(str::to_string);
        let token = non_empty(&self.cluster_token)
            .or_else(|| self.values.non_empty_str(KEY_TOKEN))
            .map(str::to_string);

        match validate_credentials(kubeconfig.as_deref(), server.as_deref(), token.as_deref())? {
            AttachMode::KubeConfig => {
                if let Some(kubeconfig) = kubeconfig {
                    let content = resolve_kubeconfig(&kubeconfig)?;
                    self.values.set_str(KEY_KUBECONFIG, content);
                }
            }
            AttachMode::Token => {
                if let (Some(server), Some(token)) = (server, token) {
                    self.values.set_str(KEY_SERVER, server);
                    self.values.set_str(KEY_TOKEN, token);
                }
            }
        }
        Ok(())
    }

    pub async fn run_with_client(&self, client: &dyn HubClient) -> Result<RunReport> {
        if let Some(dir) = &self.scenario.out_templates_dir {
            let exported = export_templates(&[&ATTACH_HUB], ATTACH_SAMPLE_VALUES, dir)?;
            return Ok(RunReport::exported(exported));
        }

        // Objects are rendered and the import secret is polled under the same name
        let mut values = self.values.clone();
        let cluster_name = resolve_cluster_name(self.cluster_name.as_deref(), &mut values)?;
        let applier = Applier::new(client);

        if self.scenario.dry_run {
            let manifests = applier.processor().render_scenario(&ATTACH_HUB, &values)?;
            return Ok(RunReport::dry_run(manifests));
        }

        let manifests = applier
            .create_or_update_scenario(&ATTACH_HUB, &values)
            .await?;
        info!(cluster = %cluster_name, "cluster attached");

        let secret = wait_for_import_secret(client, &cluster_name, self.scenario.timeout()).await?;
        if let Some(path) = &self.import_file {
            write_import_file(path, &secret)?;
        }

        Ok(RunReport {
            manifests,
            applied: true,
            import_file: self.import_file.clone(),
            exported_templates: Vec::new(),
        })
    }
}
