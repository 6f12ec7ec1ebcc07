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

/// Values map keys
pub const KEY_MANAGED_CLUSTER_NAME: &str = "managedClusterName";
pub const KEY_KUBECONFIG: &str = "kubeConfig";
pub const KEY_SERVER: &str = "server";
pub const KEY_TOKEN: &str = "token";
pub const KEY_CLOUD: &str = "cloud";

/// Values keys every create scenario needs regardless of provider
pub const CREATE_COMMON_KEYS: &[&str] = &[
    "ocpImage",
    "baseDomain",
    "pullSecret",
    "sshPublicKey",
    "sshPrivateKey",
];

/// The hub registers itself under this name
pub const LOCAL_CLUSTER_NAME: &str = "local-cluster";

/// Import secret naming: `<cluster>-import` in namespace `<cluster>`
pub const IMPORT_SECRET_SUFFIX: &str = "-import";
pub const IMPORT_SECRET_CRDS_KEY: &str = "crds.yaml";
pub const IMPORT_SECRET_IMPORT_KEY: &str = "import.yaml";
pub const IMPORT_FILE_SEPARATOR: &str = "\n---\n";
pub const IMPORT_FILE_MODE: u32 = 0o600;

/// Polling
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const POLL_INTERVAL_SECONDS: u64 = 1;

/// Server-side apply field manager
pub const FIELD_MANAGER: &str = "cm-cli";

/// Maximum length of a DNS-1123 label
pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;
