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

//! Render scenario templates and apply them to the hub

pub mod manifest;
pub mod template;

pub use self::manifest::Manifest;
pub use self::template::TemplateProcessor;

use crate::domain::values::Values;
use crate::infrastructure::kubernetes::client::HubClient;
use crate::infrastructure::scenarios::Scenario;
use crate::shared::error::Result;
use tracing::{debug, info};

pub struct Applier<'a> {
    client: &'a dyn HubClient,
    processor: TemplateProcessor<'static>,
}

impl<'a> Applier<'a> {
    pub fn new(client: &'a dyn HubClient) -> Self {
        Self {
            client,
            processor: TemplateProcessor::new(),
        }
    }

    pub fn processor(&self) -> &TemplateProcessor<'static> {
        &self.processor
    }

    /// Render `scenario` from `values` and create or update every object it
    /// yields. Returns the applied manifests in apply order.
    pub async fn create_or_update_scenario(
        &self,
        scenario: &Scenario,
        values: &Values,
    ) -> Result<Vec<Manifest>> {
        let manifests = self.processor.render_scenario(scenario, values)?;
        self.apply_manifests(&manifests).await?;
        info!(scenario = scenario.path, count = manifests.len(), "scenario applied");
        Ok(manifests)
    }

    pub async fn apply_manifests(&self, manifests: &[Manifest]) -> Result<()> {
        for manifest in manifests {
            debug!(object = %manifest, source = %manifest.source, "applying");
            self.client.apply_manifest(manifest).await?;
        }
        Ok(())
    }
}
