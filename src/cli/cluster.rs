//! Cluster commands

use super::commands::HubArgs;
use super::display::TableRenderer;
use crate::domain::cluster::{AttachClusterOptions, CreateClusterOptions};
use crate::domain::{RunReport, ScenarioOptions};
use crate::infrastructure::constants::DEFAULT_TIMEOUT_SECONDS;
use crate::infrastructure::kubernetes::{HubClientImpl, OfflineHubClient};
use anyhow::Context;
use clap::{Args, Parser};
use colored::Colorize;
use std::path::PathBuf;

/// Flags shared by scenario commands
#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    /// YAML values file describing the cluster
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Seconds to wait for the import secret
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout: u64,

    /// Write the templates and sample values files to DIR instead of applying
    #[arg(long, value_name = "DIR")]
    pub out_templates_dir: Option<PathBuf>,

    /// Print the rendered resources without applying them
    #[arg(long)]
    pub dry_run: bool,
}

impl From<&ScenarioArgs> for ScenarioOptions {
    fn from(args: &ScenarioArgs) -> Self {
        Self {
            values_path: args.values.clone(),
            out_templates_dir: args.out_templates_dir.clone(),
            timeout: args.timeout,
            dry_run: args.dry_run,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AttachClusterCommand {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Managed cluster name, overrides managedClusterName from the values file
    #[arg(long)]
    pub name: Option<String>,

    /// API server URL of the managed cluster (requires --cluster-token)
    #[arg(long)]
    pub cluster_server: Option<String>,

    /// Token to access the managed cluster (requires --cluster-server)
    #[arg(long)]
    pub cluster_token: Option<String>,

    /// Kubeconfig of the managed cluster, a path or the content itself
    #[arg(long)]
    pub cluster_kubeconfig: Option<String>,

    /// Write the import manifests to FILE
    #[arg(long, short = 'o', value_name = "FILE")]
    pub import_file: Option<PathBuf>,
}

impl AttachClusterCommand {
    pub fn to_options(&self) -> AttachClusterOptions {
        AttachClusterOptions {
            scenario: ScenarioOptions::from(&self.scenario),
            cluster_name: self.name.clone(),
            cluster_server: self.cluster_server.clone(),
            cluster_token: self.cluster_token.clone(),
            cluster_kubeconfig: self.cluster_kubeconfig.clone(),
            import_file: self.import_file.clone(),
            ..Default::default()
        }
    }

    pub async fn execute(&self, hub: &HubArgs) -> anyhow::Result<()> {
        let mut options = self.to_options();
        options.complete().context("Failed to load values")?;
        options.validate().context("Invalid attach options")?;

        let result = if options.scenario.needs_hub() {
            let client = connect(hub).await?;
            options.run_with_client(&client).await
        } else {
            options.run_with_client(&OfflineHubClient).await
        };
        let report = result.context("Failed to attach cluster")?;

        print_report(&report)?;
        if report.applied {
            println!(
                "{} Cluster {} attached",
                "✓".green(),
                options.cluster_name.as_deref().unwrap_or_default().bold()
            );
            if report.import_file.is_none() {
                println!("  Use -o FILE to save the import manifests for the managed cluster");
            }
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CreateClusterCommand {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Managed cluster name, overrides managedClusterName from the values file
    #[arg(long)]
    pub name: Option<String>,

    /// Wait for the cluster and write its import manifests to FILE
    #[arg(long, short = 'o', value_name = "FILE")]
    pub import_file: Option<PathBuf>,
}

impl CreateClusterCommand {
    pub fn to_options(&self) -> CreateClusterOptions {
        CreateClusterOptions {
            scenario: ScenarioOptions::from(&self.scenario),
            cluster_name: self.name.clone(),
            import_file: self.import_file.clone(),
            ..Default::default()
        }
    }

    pub async fn execute(&self, hub: &HubArgs) -> anyhow::Result<()> {
        let mut options = self.to_options();
        options.complete().context("Failed to load values")?;
        options.validate().context("Invalid create options")?;

        let result = if options.scenario.needs_hub() {
            let client = connect(hub).await?;
            options.run_with_client(&client).await
        } else {
            options.run_with_client(&OfflineHubClient).await
        };
        let report = result.context("Failed to create cluster")?;

        print_report(&report)?;
        if report.applied {
            println!(
                "{} Cluster {} creation started on {}",
                "✓".green(),
                options.cluster_name.as_deref().unwrap_or_default().bold(),
                options
                    .cloud
                    .map(|cloud| cloud.to_string())
                    .unwrap_or_default()
            );
        }
        Ok(())
    }
}

async fn connect(hub: &HubArgs) -> anyhow::Result<HubClientImpl> {
    HubClientImpl::new_with_config(hub.kubeconfig.clone(), hub.context.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to the hub: {}", e))
}

fn print_report(report: &RunReport) -> anyhow::Result<()> {
    if !report.applied && report.exported_templates.is_empty() {
        // Dry run: the manifests go to stdout as a YAML stream
        for manifest in &report.manifests {
            println!("---\n{}", manifest.to_yaml()?.trim_end());
        }
        eprintln!("{}", TableRenderer::new().render_report(report));
        return Ok(());
    }

    println!("{}", TableRenderer::new().render_report(report));
    Ok(())
}
