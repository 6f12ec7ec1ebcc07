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

//! Handlebars rendering of scenario templates into manifests

use crate::domain::values::Values;
use crate::infrastructure::applier::manifest::Manifest;
use crate::infrastructure::scenarios::{Scenario, Template};
use crate::shared::error::{CmError, Result};
use handlebars::{Context as HbsContext, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// `{{quote value}}` writes `value` as a JSON string literal, which is also a
/// valid double-quoted YAML scalar. Missing values render as `""`.
fn quote_helper(
    h: &Helper,
    _: &Handlebars,
    _: &HbsContext,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let quoted = match h.param(0).map(|p| p.value()) {
        None | Some(JsonValue::Null) => JsonValue::String(String::new()),
        Some(JsonValue::String(s)) => JsonValue::String(s.clone()),
        Some(other) => JsonValue::String(other.to_string()),
    };
    out.write(&quoted.to_string())?;
    Ok(())
}

pub struct TemplateProcessor<'reg> {
    handlebars: Handlebars<'reg>,
}

impl Default for TemplateProcessor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateProcessor<'_> {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Output is YAML, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("quote", Box::new(quote_helper));
        Self { handlebars }
    }

    pub fn render_template(
        &self,
        scenario: &Scenario,
        template: &Template,
        values: &Values,
    ) -> Result<String> {
        self.handlebars
            .render_template(template.content, values)
            .map_err(|e| {
                CmError::TemplateError(format!(
                    "failed to render {}/{}: {}",
                    scenario.path, template.name, e
                ))
            })
    }

    /// Render every template of `scenario`, in order, into manifests.
    pub fn render_scenario(&self, scenario: &Scenario, values: &Values) -> Result<Vec<Manifest>> {
        let mut manifests = Vec::new();
        for template in scenario.templates {
            let rendered = self.render_template(scenario, template, values)?;
            let source = format!("{}/{}", scenario.path, template.name);
            let docs = parse_documents(&rendered, &source)?;
            if docs.is_empty() {
                tracing::debug!(template = %source, "template rendered no objects");
            }
            manifests.extend(docs);
        }
        Ok(manifests)
    }
}

/// Parse a rendered template into manifests. A template may render zero or
/// more YAML documents; empty documents are skipped.
pub fn parse_documents(rendered: &str, source: &str) -> Result<Vec<Manifest>> {
    if rendered.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut manifests = Vec::new();
    for document in serde_yaml::Deserializer::from_str(rendered) {
        let value = JsonValue::deserialize(document).map_err(|e| {
            CmError::TemplateError(format!("{} rendered invalid YAML: {}", source, e))
        })?;
        if value.is_null() {
            continue;
        }
        manifests.push(Manifest::from_value(value, source)?);
    }
    Ok(manifests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scenarios::ATTACH_HUB;
    use serde_json::json;

    fn values(pairs: serde_json::Value) -> Values {
        match pairs {
            serde_json::Value::Object(map) => Values::from(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_quote_helper_escapes() {
        let processor = TemplateProcessor::new();
        let template = Template {
            name: "t.yaml",
            content: "a: {{quote text}}\nb: {{quote missing}}\nc: {{quote n}}\n",
        };
        let rendered = processor
            .render_template(
                &ATTACH_HUB,
                &template,
                &values(json!({"text": "line1\nline2 \"q\" <x>", "n": 3})),
            )
            .unwrap();

        let parsed: serde_json::Value = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(parsed["a"], "line1\nline2 \"q\" <x>");
        assert_eq!(parsed["b"], "");
        assert_eq!(parsed["c"], "3");
    }

    #[test]
    fn test_parse_documents_skips_empty() {
        let rendered = "\n\n---\napiVersion: v1\nkind: Namespace\nmetadata:\n  name: a\n---\n";
        let manifests = parse_documents(rendered, "inline").unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].name, "a");
        assert!(parse_documents("   \n", "inline").unwrap().is_empty());
    }

    #[test]
    fn test_render_attach_with_token() {
        let processor = TemplateProcessor::new();
        let manifests = processor
            .render_scenario(
                &ATTACH_HUB,
                &values(json!({
                    "managedClusterName": "c1",
                    "server": "https://api.c1:6443",
                    "token": "t0k3n"
                })),
            )
            .unwrap();

        let kinds: Vec<&str> = manifests.iter().map(|m| m.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec!["Namespace", "ManagedCluster", "KlusterletAddonConfig", "Secret"]
        );

        let secret = &manifests[3];
        assert_eq!(secret.namespace.as_deref(), Some("c1"));
        assert_eq!(secret.body["stringData"]["token"], "t0k3n");
        assert_eq!(secret.body["stringData"]["server"], "https://api.c1:6443");
        assert!(secret.body["stringData"].get("kubeconfig").is_none());
    }

    #[test]
    fn test_render_attach_with_kubeconfig() {
        let processor = TemplateProcessor::new();
        let kubeconfig = "apiVersion: v1\nkind: Config\nclusters: []\n";
        let manifests = processor
            .render_scenario(
                &ATTACH_HUB,
                &values(json!({"managedClusterName": "c1", "kubeConfig": kubeconfig})),
            )
            .unwrap();

        let secret = manifests.iter().find(|m| m.kind == "Secret").unwrap();
        assert_eq!(secret.body["stringData"]["kubeconfig"], kubeconfig);
        assert!(secret.body["stringData"].get("token").is_none());
    }

    #[test]
    fn test_render_attach_manual_has_no_secret() {
        let processor = TemplateProcessor::new();
        let manifests = processor
            .render_scenario(&ATTACH_HUB, &values(json!({"managedClusterName": "c1"})))
            .unwrap();
        assert_eq!(manifests.len(), 3);
        assert!(manifests.iter().all(|m| m.kind != "Secret"));
    }

    #[test]
    fn test_render_local_cluster() {
        let processor = TemplateProcessor::new();
        let manifests = processor
            .render_scenario(
                &ATTACH_HUB,
                &values(json!({
                    "managedClusterName": "local-cluster",
                    "kubeConfig": "ignored"
                })),
            )
            .unwrap();

        assert!(manifests.iter().all(|m| m.kind != "Secret"));
        let cluster = manifests.iter().find(|m| m.kind == "ManagedCluster").unwrap();
        assert_eq!(cluster.body["metadata"]["labels"]["local-cluster"], "true");
    }

    #[test]
    fn test_render_custom_labels() {
        let processor = TemplateProcessor::new();
        let manifests = processor
            .render_scenario(
                &ATTACH_HUB,
                &values(json!({
                    "managedClusterName": "c1",
                    "labels": {
                        "environment": "dev",
                        "example.com/team: a #1": "platform"
                    }
                })),
            )
            .unwrap();

        let cluster = manifests.iter().find(|m| m.kind == "ManagedCluster").unwrap();
        assert_eq!(cluster.body["metadata"]["labels"]["environment"], "dev");
        assert_eq!(
            cluster.body["metadata"]["labels"]["example.com/team: a #1"],
            "platform"
        );
        assert_eq!(cluster.body["metadata"]["labels"]["name"], "c1");
    }
}
