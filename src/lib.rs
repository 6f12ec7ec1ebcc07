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

//! cm: create and attach clusters to an Open Cluster Management hub
//!
//! Commands render embedded scenario templates from a YAML values file and
//! apply the resulting objects to the hub with server-side apply.

// Core modules
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export commonly used types
pub use domain::cluster::{AttachClusterOptions, CloudProvider, CreateClusterOptions};
pub use domain::{RunReport, ScenarioOptions, Values};
pub use infrastructure::applier::{Applier, Manifest, TemplateProcessor};
pub use infrastructure::kubernetes::{HubClient, HubClientImpl};
pub use shared::{CmError, Result};
