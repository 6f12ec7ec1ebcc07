// CLI command definitions

use super::cluster::{AttachClusterCommand, CreateClusterCommand};
use clap::{Args, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "cm",
    version,
    about = "Create and attach clusters to an Open Cluster Management hub",
    long_about = "Render cluster scenarios from a values file and apply them to the hub with server-side apply"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub hub: HubArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Hub connection, shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct HubArgs {
    /// Path to the hub kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<String>,

    /// Kubeconfig context of the hub
    /// If not specified, uses current context from kubeconfig
    #[arg(long, global = true)]
    pub context: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create resources on the hub
    #[command(subcommand)]
    Create(CreateCommands),

    /// Attach existing resources to the hub
    #[command(subcommand)]
    Attach(AttachCommands),
}

#[derive(clap::Subcommand, Debug)]
pub enum CreateCommands {
    /// Provision a new managed cluster from the hub (aws, azure, gcp, vsphere)
    Cluster(CreateClusterCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum AttachCommands {
    /// Register an existing cluster as a managed cluster
    Cluster(AttachClusterCommand),
}

impl Commands {
    pub async fn execute(&self, hub: &HubArgs) -> anyhow::Result<()> {
        match self {
            Commands::Create(CreateCommands::Cluster(cmd)) => cmd.execute(hub).await,
            Commands::Attach(AttachCommands::Cluster(cmd)) => cmd.execute(hub).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_attach_cluster() {
        let args = CliArgs::try_parse_from([
            "cm",
            "--context",
            "hub",
            "attach",
            "cluster",
            "--values",
            "values.yaml",
            "--name",
            "c1",
            "--cluster-server",
            "https://api.c1:6443",
            "--cluster-token",
            "sha256~abc",
            "-o",
            "import.yaml",
        ])
        .unwrap();

        assert_eq!(args.hub.context.as_deref(), Some("hub"));
        match args.command {
            Commands::Attach(AttachCommands::Cluster(cmd)) => {
                assert_eq!(cmd.name.as_deref(), Some("c1"));
                assert_eq!(cmd.cluster_server.as_deref(), Some("https://api.c1:6443"));
                assert_eq!(cmd.scenario.timeout, 60);
                assert_eq!(
                    cmd.import_file.as_deref(),
                    Some(std::path::Path::new("import.yaml"))
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_create_cluster_global_flag_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "cm",
            "create",
            "cluster",
            "--values",
            "values.yaml",
            "--kubeconfig",
            "/tmp/hub.kubeconfig",
            "--timeout",
            "5",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.hub.kubeconfig.as_deref(), Some("/tmp/hub.kubeconfig"));
        match args.command {
            Commands::Create(CreateCommands::Cluster(cmd)) => {
                assert_eq!(cmd.scenario.timeout, 5);
                assert!(cmd.scenario.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
