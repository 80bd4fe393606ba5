// CLI argument parsing and definitions

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "schematics")]
#[command(about = "Inspect and manage IBM Cloud Schematics resources")]
#[command(
    after_help = "Credentials are read from ibm-credentials.env, SCHEMATICS_* environment variables or VCAP_SERVICES.\nSet SCHEMATICS_APIKEY for IAM, or SCHEMATICS_AUTH_TYPE=bearertoken with SCHEMATICS_BEARER_TOKEN."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Service endpoint, overriding any configured URL
    #[arg(long, global = true, conflicts_with = "region")]
    pub url: Option<String>,

    /// Use the regional endpoint, e.g. us-south or eu-de
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Retry transient failures up to this many times
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the service's API and Terraform versions
    Version,
    /// List the locations Schematics runs in
    Locations,
    /// Workspace operations
    Workspace {
        #[command(subcommand)]
        command: WorkspaceSubcommand,
    },
    /// Job operations
    Job {
        #[command(subcommand)]
        command: JobSubcommand,
    },
    /// Action operations
    Action {
        #[command(subcommand)]
        command: ActionSubcommand,
    },
    /// Agent operations
    Agent {
        #[command(subcommand)]
        command: AgentSubcommand,
    },
    /// Policy operations
    Policy {
        #[command(subcommand)]
        command: PolicySubcommand,
    },
}

/// Paging flags shared by the list commands.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct PageArgs {
    /// Records to skip
    #[arg(long)]
    pub offset: Option<i64>,
    /// Maximum records per page
    #[arg(long)]
    pub limit: Option<i64>,
    /// Follow pagination and print every record
    #[arg(long, conflicts_with = "offset")]
    pub all: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum WorkspaceSubcommand {
    /// List workspaces
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Only workspaces in this resource group
        #[arg(long)]
        resource_group: Option<String>,
    },
    /// Show one workspace
    Get {
        /// Workspace ID
        id: String,
    },
    /// Delete a workspace
    Delete {
        /// Workspace ID
        id: String,
        /// IAM refresh token
        #[arg(long)]
        refresh_token: String,
        /// Also destroy the resources the workspace manages
        #[arg(long)]
        destroy_resources: bool,
    },
    /// Print the Terraform log of a template
    Logs {
        /// Workspace ID
        id: String,
        /// Template ID
        template: String,
        /// Log of a specific activity instead of the latest one
        #[arg(long)]
        activity: Option<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum JobSubcommand {
    /// List jobs
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Only jobs of this workspace
        #[arg(long, conflicts_with = "action_id")]
        workspace_id: Option<String>,
        /// Only jobs of this action
        #[arg(long)]
        action_id: Option<String>,
    },
    /// Show one job
    Get {
        /// Job ID
        id: String,
    },
    /// Print a job's log
    Logs {
        /// Job ID
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ActionSubcommand {
    /// List actions
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one action
    Get {
        /// Action ID
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum AgentSubcommand {
    /// List agents
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one agent
    Get {
        /// Agent ID
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PolicySubcommand {
    /// List policies
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one policy
    Get {
        /// Policy ID
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "schematics",
            "workspace",
            "get",
            "ws-1",
            "--region",
            "eu-de",
            "--retries",
            "3",
        ])
        .unwrap();

        assert_eq!(args.region.as_deref(), Some("eu-de"));
        assert_eq!(args.retries, Some(3));
        match args.command {
            Command::Workspace {
                command: WorkspaceSubcommand::Get { id },
            } => assert_eq!(id, "ws-1"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_url_and_region_conflict() {
        let result = Args::try_parse_from([
            "schematics",
            "version",
            "--url",
            "https://example.com",
            "--region",
            "us-south",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_requires_refresh_token() {
        assert!(Args::try_parse_from(["schematics", "workspace", "delete", "ws-1"]).is_err());

        let args = Args::try_parse_from([
            "schematics",
            "workspace",
            "delete",
            "ws-1",
            "--refresh-token",
            "rt",
            "--destroy-resources",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Command::Workspace {
                command: WorkspaceSubcommand::Delete {
                    destroy_resources: true,
                    ..
                }
            }
        ));
    }

    #[test]
    fn test_list_paging_flags() {
        let args =
            Args::try_parse_from(["schematics", "job", "list", "--all", "--limit", "50"]).unwrap();
        match args.command {
            Command::Job {
                command: JobSubcommand::List { page, .. },
            } => {
                assert!(page.all);
                assert_eq!(page.limit, Some(50));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let conflicting = ["schematics", "job", "list", "--all", "--offset", "5"];
        assert!(Args::try_parse_from(conflicting).is_err());
    }
}
