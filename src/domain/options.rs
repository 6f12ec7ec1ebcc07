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

//! Options shared by every scenario-driven command

use crate::domain::values::Values;
use crate::infrastructure::applier::Manifest;
use crate::infrastructure::constants::DEFAULT_TIMEOUT_SECONDS;
use crate::shared::error::{CmError, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScenarioOptions {
    /// YAML values file the scenario is rendered from
    pub values_path: Option<PathBuf>,
    /// Export the raw templates here instead of applying anything
    pub out_templates_dir: Option<PathBuf>,
    /// Seconds to wait for the import secret
    pub timeout: u64,
    /// Render and print, do not apply
    pub dry_run: bool,
}

impl Default for ScenarioOptions {
    fn default() -> Self {
        Self {
            values_path: None,
            out_templates_dir: None,
            timeout: DEFAULT_TIMEOUT_SECONDS,
            dry_run: false,
        }
    }
}

impl ScenarioOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn exports_templates(&self) -> bool {
        self.out_templates_dir.is_some()
    }

    /// Template export and dry runs never talk to the hub.
    pub fn needs_hub(&self) -> bool {
        !self.exports_templates() && !self.dry_run
    }

    pub fn load_values(&self) -> Result<Values> {
        let path = self.values_path.as_ref().ok_or_else(|| {
            CmError::FileError("values file is required (use --values)".to_string())
        })?;
        Values::from_file(path)
    }
}

/// What a command run did
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Rendered manifests, in apply order
    pub manifests: Vec<Manifest>,
    /// False for dry runs
    pub applied: bool,
    pub import_file: Option<PathBuf>,
    pub exported_templates: Vec<PathBuf>,
}

impl RunReport {
    pub fn exported(paths: Vec<PathBuf>) -> Self {
        Self {
            exported_templates: paths,
            ..Default::default()
        }
    }

    pub fn dry_run(manifests: Vec<Manifest>) -> Self {
        Self {
            manifests,
            ..Default::default()
        }
    }
}

/// Treat `Some("")` like `None`, the way empty flags behave.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
