// Command handlers

use crate::cli::{
    ActionSubcommand, AgentSubcommand, Args, Command, JobSubcommand, PolicySubcommand,
    WorkspaceSubcommand,
};
use anyhow::{Context, Result};
use schematics::operations::*;
use schematics::{get_service_url_for_region, SchematicsV1, SchematicsV1Options};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const MAX_RETRY_INTERVAL: Duration = Duration::from_secs(30);

/// Build the client from external configuration plus the global flags.
pub fn build_client(args: &Args) -> Result<SchematicsV1> {
    let url = match (&args.url, &args.region) {
        (Some(url), _) => Some(url.clone()),
        (None, Some(region)) => Some(get_service_url_for_region(region)?.to_string()),
        (None, None) => None,
    };

    let mut client = SchematicsV1::new_using_external_config(SchematicsV1Options {
        url,
        ..Default::default()
    })
    .context("Failed to configure the Schematics client")?;

    if let Some(retries) = args.retries {
        client.enable_retries(retries, MAX_RETRY_INTERVAL);
    }
    Ok(client)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{rendered}");
    Ok(())
}

/// Main command dispatcher
pub async fn execute_command(args: Args) -> Result<()> {
    let client = build_client(&args)?;
    debug!(url = %client.service_url(), command = ?args.command, "Dispatching command");

    match args.command {
        Command::Version => {
            let version = client
                .get_schematics_version(&GetSchematicsVersionOptions::default())
                .await
                .context("Failed to get the service version")?;
            print_json(&version.result)
        }
        Command::Locations => {
            let locations = client
                .list_locations(&ListLocationsOptions::default())
                .await
                .context("Failed to list locations")?;
            print_json(&locations.result)
        }
        Command::Workspace { command } => handle_workspace(&client, command).await,
        Command::Job { command } => handle_job(&client, command).await,
        Command::Action { command } => handle_action(&client, command).await,
        Command::Agent { command } => handle_agent(&client, command).await,
        Command::Policy { command } => handle_policy(&client, command).await,
    }
}

async fn handle_workspace(client: &SchematicsV1, command: WorkspaceSubcommand) -> Result<()> {
    match command {
        WorkspaceSubcommand::List {
            page,
            resource_group,
        } => {
            let options = ListWorkspacesOptions {
                offset: page.offset,
                limit: page.limit,
                resource_group,
                ..Default::default()
            };
            if page.all {
                let all = client
                    .list_all_workspaces(&options)
                    .await
                    .context("Failed to list workspaces")?;
                print_json(&all)
            } else {
                let list = client
                    .list_workspaces(&options)
                    .await
                    .context("Failed to list workspaces")?;
                print_json(&list.result)
            }
        }
        WorkspaceSubcommand::Get { id } => {
            let workspace = client
                .get_workspace(&GetWorkspaceOptions::new(id.as_str()))
                .await
                .with_context(|| format!("Failed to get workspace {id}"))?;
            print_json(&workspace.result)
        }
        WorkspaceSubcommand::Delete {
            id,
            refresh_token,
            destroy_resources,
        } => {
            let options = DeleteWorkspaceOptions {
                destroy_resources: destroy_resources.then(|| "true".to_string()),
                ..DeleteWorkspaceOptions::new(id.as_str(), refresh_token)
            };
            let response = client
                .delete_workspace(&options)
                .await
                .with_context(|| format!("Failed to delete workspace {id}"))?;
            println!("{}", response.result.trim());
            Ok(())
        }
        WorkspaceSubcommand::Logs {
            id,
            template,
            activity,
        } => {
            let log = match activity {
                Some(activity) => client
                    .get_template_activity_log(&GetTemplateActivityLogOptions::new(
                        id.as_str(),
                        template.as_str(),
                        activity,
                    ))
                    .await
                    .with_context(|| format!("Failed to fetch logs of workspace {id}"))?,
                None => client
                    .get_template_logs(&GetTemplateLogsOptions::new(id.as_str(), template.as_str()))
                    .await
                    .with_context(|| format!("Failed to fetch logs of workspace {id}"))?,
            };
            print!("{}", log.result);
            Ok(())
        }
    }
}

async fn handle_job(client: &SchematicsV1, command: JobSubcommand) -> Result<()> {
    match command {
        JobSubcommand::List {
            page,
            workspace_id,
            action_id,
        } => {
            let resource = if workspace_id.is_some() {
                Some("workspace".to_string())
            } else if action_id.is_some() {
                Some("action".to_string())
            } else {
                None
            };
            let options = ListJobsOptions {
                offset: page.offset,
                limit: page.limit,
                resource,
                workspace_id,
                action_id,
                ..Default::default()
            };
            if page.all {
                let all = client
                    .list_all_jobs(&options)
                    .await
                    .context("Failed to list jobs")?;
                print_json(&all)
            } else {
                let list = client
                    .list_jobs(&options)
                    .await
                    .context("Failed to list jobs")?;
                print_json(&list.result)
            }
        }
        JobSubcommand::Get { id } => {
            let job = client
                .get_job(&GetJobOptions::new(id.as_str()))
                .await
                .with_context(|| format!("Failed to get job {id}"))?;
            print_json(&job.result)
        }
        JobSubcommand::Logs { id } => {
            let logs = client
                .list_job_logs(&ListJobLogsOptions::new(id.as_str()))
                .await
                .with_context(|| format!("Failed to fetch logs of job {id}"))?;
            print_json(&logs.result)
        }
    }
}

async fn handle_action(client: &SchematicsV1, command: ActionSubcommand) -> Result<()> {
    match command {
        ActionSubcommand::List { page } => {
            let options = ListActionsOptions {
                offset: page.offset,
                limit: page.limit,
                ..Default::default()
            };
            if page.all {
                let all = client
                    .list_all_actions(&options)
                    .await
                    .context("Failed to list actions")?;
                print_json(&all)
            } else {
                let list = client
                    .list_actions(&options)
                    .await
                    .context("Failed to list actions")?;
                print_json(&list.result)
            }
        }
        ActionSubcommand::Get { id } => {
            let action = client
                .get_action(&GetActionOptions::new(id.as_str()))
                .await
                .with_context(|| format!("Failed to get action {id}"))?;
            print_json(&action.result)
        }
    }
}

async fn handle_agent(client: &SchematicsV1, command: AgentSubcommand) -> Result<()> {
    match command {
        AgentSubcommand::List { page } => {
            let options = ListAgentDataOptions {
                offset: page.offset,
                limit: page.limit,
                ..Default::default()
            };
            if page.all {
                let all = client
                    .list_all_agent_data(&options)
                    .await
                    .context("Failed to list agents")?;
                print_json(&all)
            } else {
                let list = client
                    .list_agent_data(&options)
                    .await
                    .context("Failed to list agents")?;
                print_json(&list.result)
            }
        }
        AgentSubcommand::Get { id } => {
            let agent = client
                .get_agent_data(&GetAgentDataOptions::new(id.as_str()))
                .await
                .with_context(|| format!("Failed to get agent {id}"))?;
            print_json(&agent.result)
        }
    }
}

async fn handle_policy(client: &SchematicsV1, command: PolicySubcommand) -> Result<()> {
    match command {
        PolicySubcommand::List { page } => {
            let options = ListPolicyOptions {
                offset: page.offset,
                limit: page.limit,
                ..Default::default()
            };
            if page.all {
                let all = client
                    .list_all_policies(&options)
                    .await
                    .context("Failed to list policies")?;
                print_json(&all)
            } else {
                let list = client
                    .list_policy(&options)
                    .await
                    .context("Failed to list policies")?;
                print_json(&list.result)
            }
        }
        PolicySubcommand::Get { id } => {
            let policy = client
                .get_policy(&GetPolicyOptions::new(id.as_str()))
                .await
                .with_context(|| format!("Failed to get policy {id}"))?;
            print_json(&policy.result)
        }
    }
}
