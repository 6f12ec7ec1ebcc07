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

//! Import secret handling
//!
//! The hub generates `<cluster>-import` in the cluster namespace once the
//! ManagedCluster is accepted. It holds the CRDs and the klusterlet manifests
//! that must be applied on the managed cluster.

use crate::infrastructure::constants::{
    IMPORT_FILE_MODE, IMPORT_FILE_SEPARATOR, IMPORT_SECRET_CRDS_KEY, IMPORT_SECRET_IMPORT_KEY,
    IMPORT_SECRET_SUFFIX, POLL_INTERVAL_SECONDS,
};
use crate::infrastructure::kubernetes::HubClient;
use crate::shared::error::{CmError, Result};
use k8s_openapi::api::core::v1::Secret;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tokio::time::{interval, timeout as with_timeout};
use tracing::{debug, info, warn};

pub fn import_secret_name(cluster_name: &str) -> String {
    format!("{}{}", cluster_name, IMPORT_SECRET_SUFFIX)
}

/// Poll the hub for the import secret of `cluster_name`. The first attempt is
/// immediate, then one per second until `timeout` elapses.
pub async fn wait_for_import_secret(
    client: &dyn HubClient,
    cluster_name: &str,
    timeout: Duration,
) -> Result<Secret> {
    let name = import_secret_name(cluster_name);
    info!(secret = %name, namespace = %cluster_name, ?timeout, "waiting for import secret");

    let poll = async {
        let mut ticker = interval(Duration::from_secs(POLL_INTERVAL_SECONDS));
        let mut attempt = 0u32;
        loop {
            ticker.tick().await;
            attempt += 1;
            match client.get_secret(cluster_name, &name).await {
                Ok(secret) => return Ok(secret),
                Err(e) if e.is_not_found() => {
                    debug!(secret = %name, attempt, "import secret not found yet");
                }
                Err(e) => return Err(e),
            }
        }
    };

    match with_timeout(timeout, poll).await {
        Ok(result) => result,
        Err(_) => Err(CmError::Timeout(format!(
            "import secret {}/{} not available after {}s",
            cluster_name,
            name,
            timeout.as_secs()
        ))),
    }
}

fn secret_field<'a>(secret: &'a Secret, key: &str) -> &'a [u8] {
    match secret.data.as_ref().and_then(|data| data.get(key)) {
        Some(value) => value.0.as_slice(),
        None => {
            warn!(key, "import secret has no such key, writing it empty");
            &[]
        }
    }
}

/// `crds.yaml`, a document separator, then `import.yaml`.
pub fn import_file_content(secret: &Secret) -> Vec<u8> {
    let crds = secret_field(secret, IMPORT_SECRET_CRDS_KEY);
    let import = secret_field(secret, IMPORT_SECRET_IMPORT_KEY);

    let mut content = Vec::with_capacity(crds.len() + IMPORT_FILE_SEPARATOR.len() + import.len());
    content.extend_from_slice(crds);
    content.extend_from_slice(IMPORT_FILE_SEPARATOR.as_bytes());
    content.extend_from_slice(import);
    content
}

/// Write the import file. It carries cluster credentials, so it is created
/// readable by the owner only and never exists with wider permissions.
pub fn write_import_file(path: &Path, secret: &Secret) -> Result<()> {
    let content = import_file_content(secret);
    let write_error = |e: std::io::Error| {
        CmError::FileError(format!(
            "failed to write import file {}: {}",
            path.display(),
            e
        ))
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(IMPORT_FILE_MODE);
    }
    let mut file = options.open(path).map_err(write_error)?;

    // The mode only applies on creation; tighten an existing file before
    // writing into it.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(IMPORT_FILE_MODE))
            .map_err(write_error)?;
    }

    file.write_all(&content).map_err(write_error)?;

    info!(path = %path.display(), bytes = content.len(), "import file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::ByteString;
    use std::collections::BTreeMap;

    fn secret(entries: &[(&str, &str)]) -> Secret {
        let data: BTreeMap<String, ByteString> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec())))
            .collect();
        Secret {
            data: Some(data),
            ..Default::default()
        }
    }

    #[test]
    fn test_import_secret_name() {
        assert_eq!(import_secret_name("c1"), "c1-import");
    }

    #[test]
    fn test_import_file_content() {
        let s = secret(&[("crds.yaml", "crds: mycrds"), ("import.yaml", "import: myimport")]);
        assert_eq!(
            import_file_content(&s),
            b"crds: mycrds\n---\nimport: myimport".to_vec()
        );
    }

    #[test]
    fn test_import_file_content_missing_key() {
        let s = secret(&[("import.yaml", "import: myimport")]);
        assert_eq!(import_file_content(&s), b"\n---\nimport: myimport".to_vec());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_import_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.yaml");
        write_import_file(&path, &secret(&[("crds.yaml", "a"), ("import.yaml", "b")])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n---\nb");
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_import_file_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.yaml");
        fs::write(&path, "stale content that is longer than the new one").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_import_file(&path, &secret(&[("crds.yaml", "a"), ("import.yaml", "b")])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n---\nb");
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
