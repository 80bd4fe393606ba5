//! Workspace operations against a mock Schematics API
//!
//! Each test checks the wire shape of one call: verb, path, query string,
//! headers and JSON body, plus how the response comes back.

use schematics::models::{
    TemplateRepoRequest, TemplateSourceDataRequest, WorkspaceActivityOptionsTemplate,
};
use schematics::operations::*;
use schematics::CoreError;
use serde_json::json;

mod common;
use common::{MockResponse, MockServer};

#[tokio::test]
async fn test_list_workspaces_sends_paging_query() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(
        200,
        json!({
            "count": 1,
            "limit": 10,
            "offset": 0,
            "workspaces": [{"id": "ws-1", "name": "demo", "status": "ACTIVE"}]
        }),
    ));

    let options = ListWorkspacesOptions {
        offset: Some(0),
        limit: Some(10),
        resource_group: Some("default".into()),
        ..Default::default()
    };
    let response = server.client().list_workspaces(&options).await.unwrap();

    assert_eq!(response.status_code, 200);
    let workspaces = response.result.workspaces.unwrap();
    assert_eq!(workspaces[0].id.as_deref(), Some("ws-1"));
    assert_eq!(workspaces[0].status.as_deref(), Some("ACTIVE"));

    let request = server.last_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/v1/workspaces");
    assert_eq!(request.query_param("offset").as_deref(), Some("0"));
    assert_eq!(request.query_param("limit").as_deref(), Some("10"));
    assert_eq!(request.query_param("resource_group").as_deref(), Some("default"));
    assert_eq!(request.query_param("profile"), None);
    assert_eq!(request.header("accept"), Some("application/json"));
    assert_eq!(
        request.header("x-ibmcloud-sdk-analytics"),
        Some("service_name=schematics;service_version=V1;operation_id=ListWorkspaces")
    );
}

#[tokio::test]
async fn test_create_workspace_body_and_github_token() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(201, json!({"id": "ws-new", "name": "demo"})));

    let options = CreateWorkspaceOptions {
        name: Some("demo".into()),
        location: Some("us-south".into()),
        r#type: Some(vec!["terraform_v1.5".into()]),
        template_repo: Some(TemplateRepoRequest {
            url: Some("https://github.com/example/tf".into()),
            ..Default::default()
        }),
        template_data: Some(vec![TemplateSourceDataRequest {
            folder: Some(".".into()),
            r#type: Some("terraform_v1.5".into()),
            ..Default::default()
        }]),
        x_github_token: Some("ghp_secret".into()),
        ..Default::default()
    };
    let response = server.client().create_workspace(&options).await.unwrap();

    assert_eq!(response.status_code, 201);
    assert_eq!(response.result.id.as_deref(), Some("ws-new"));

    let request = server.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v1/workspaces");
    assert_eq!(request.header("x-github-token"), Some("ghp_secret"));
    assert_eq!(request.operation_id().as_deref(), Some("CreateWorkspace"));
    assert_eq!(
        request.json(),
        json!({
            "name": "demo",
            "location": "us-south",
            "type": ["terraform_v1.5"],
            "template_repo": {"url": "https://github.com/example/tf"},
            "template_data": [{"folder": ".", "type": "terraform_v1.5"}]
        })
    );
}

#[tokio::test]
async fn test_path_parameters_are_encoded() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(200, json!({"id": "us-south.workspace/x"})));

    let client = server.client();
    client
        .get_workspace(&GetWorkspaceOptions::new("us-south.workspace/x"))
        .await
        .unwrap();

    let request = server.last_request();
    assert_eq!(request.path, "/v1/workspaces/us-south.workspace%2Fx");
    assert_eq!(request.operation_id().as_deref(), Some("GetWorkspace"));
}

#[tokio::test]
async fn test_update_workspace_uses_patch() {
    let server = MockServer::start().await;
    let options = UpdateWorkspaceOptions {
        description: Some("patched".into()),
        ..UpdateWorkspaceOptions::new("ws-1")
    };
    server.client().update_workspace(&options).await.unwrap();

    let request = server.last_request();
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.path, "/v1/workspaces/ws-1");
    assert_eq!(request.json(), json!({"description": "patched"}));
}

#[tokio::test]
async fn test_delete_workspace_requires_refresh_token() {
    let server = MockServer::start().await;
    let client = server.client();

    let err = client
        .delete_workspace(&DeleteWorkspaceOptions::new("ws-1", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let err = client
        .delete_workspace(&DeleteWorkspaceOptions::new("", "token"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    assert!(server.requests().is_empty(), "nothing should have been sent");
}

#[tokio::test]
async fn test_delete_workspace_returns_text() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::text(200, "Deleted"));

    let options = DeleteWorkspaceOptions {
        destroy_resources: Some("true".into()),
        ..DeleteWorkspaceOptions::new("ws-1", "refresh-123")
    };
    let response = server.client().delete_workspace(&options).await.unwrap();
    assert_eq!(response.result, "Deleted");

    let request = server.last_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.header("refresh_token"), Some("refresh-123"));
    assert_eq!(request.query_param("destroy_resources").as_deref(), Some("true"));
}

#[tokio::test]
async fn test_readme_query_parameters() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(200, json!({"readme": "# hi"})));

    let options = GetWorkspaceReadmeOptions {
        r#ref: Some("main".into()),
        formatted: Some("markdown".into()),
        ..GetWorkspaceReadmeOptions::new("ws-1")
    };
    server.client().get_workspace_readme(&options).await.unwrap();

    let request = server.last_request();
    assert_eq!(request.path, "/v1/workspaces/ws-1/templates/readme");
    assert_eq!(request.query_param("ref").as_deref(), Some("main"));
    assert_eq!(request.query_param("formatted").as_deref(), Some("markdown"));
}

#[tokio::test]
async fn test_template_repo_upload_is_multipart() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(200, json!({"has_received_file": true})));

    let options = TemplateRepoUploadOptions {
        file_content_type: Some("application/x-tar".into()),
        ..TemplateRepoUploadOptions::new("ws-1", "tpl-1", b"tar-bytes".to_vec())
    };
    let response = server.client().template_repo_upload(&options).await.unwrap();
    assert_eq!(response.result.has_received_file, Some(true));

    let request = server.last_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(
        request.path,
        "/v1/workspaces/ws-1/template_data/tpl-1/template_repo_upload"
    );
    assert!(request
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));
    let body = request.body_text();
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"template.tar\""));
    assert!(body.contains("application/x-tar"));
    assert!(body.contains("tar-bytes"));
}

#[tokio::test]
async fn test_template_repo_upload_uses_given_file_name() {
    let server = MockServer::start().await;
    let options = TemplateRepoUploadOptions {
        file_name: Some("vpc-module.tar.gz".into()),
        ..TemplateRepoUploadOptions::new("ws-1", "tpl-1", b"tar-bytes".to_vec())
    };
    server.client().template_repo_upload(&options).await.unwrap();

    let body = server.last_request().body_text();
    assert!(body.contains("filename=\"vpc-module.tar.gz\""));
    assert!(!body.contains("template.tar\""));
}

#[tokio::test]
async fn test_template_repo_upload_rejects_empty_file() {
    let server = MockServer::start().await;
    let err = server
        .client()
        .template_repo_upload(&TemplateRepoUploadOptions::new("ws-1", "tpl-1", Vec::<u8>::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_outputs_come_back_as_list() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(
        200,
        json!([{"folder": ".", "id": "tpl-1", "output_values": [{"ip": "10.0.0.1"}]}]),
    ));

    let response = server
        .client()
        .get_workspace_outputs(&GetWorkspaceOutputsOptions::new("ws-1"))
        .await
        .unwrap();

    assert_eq!(response.result.len(), 1);
    let values = response.result[0].output_values.as_ref().unwrap();
    assert_eq!(values[0]["ip"], "10.0.0.1");
    assert_eq!(server.last_request().path, "/v1/workspaces/ws-1/output_values");
}

#[tokio::test]
async fn test_template_logs_are_plain_text() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::text(200, "terraform apply\nApply complete!"));

    let options = GetTemplateLogsOptions {
        log_tf_cmd: Some(true),
        log_tf_ansible: Some(false),
        ..GetTemplateLogsOptions::new("ws-1", "tpl-1")
    };
    let response = server.client().get_template_logs(&options).await.unwrap();
    assert!(response.result.contains("Apply complete!"));

    let request = server.last_request();
    assert_eq!(request.path, "/v1/workspaces/ws-1/runtime_data/tpl-1/log_store");
    assert_eq!(request.header("accept"), Some("text/plain"));
    assert_eq!(request.query_param("log_tf_cmd").as_deref(), Some("true"));
    assert_eq!(request.query_param("log_tf_ansible").as_deref(), Some("false"));
    assert_eq!(request.query_param("log_tf_prefix"), None);
}

#[tokio::test]
async fn test_template_activity_log_path() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::text(200, "log"));

    server
        .client()
        .get_template_activity_log(&GetTemplateActivityLogOptions::new("ws-1", "tpl-1", "act-9"))
        .await
        .unwrap();

    assert_eq!(
        server.last_request().path,
        "/v1/workspaces/ws-1/runtime_data/tpl-1/log_store/actions/act-9"
    );
}

#[tokio::test]
async fn test_apply_sends_tokens_and_action_options() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(202, json!({"activityid": "act-1"})));

    let options = ApplyWorkspaceCommandOptions {
        action_options: Some(WorkspaceActivityOptionsTemplate {
            target: Some(vec!["module.vpc".into()]),
            tf_vars: None,
        }),
        delegated_token: Some("delegated-1".into()),
        ..ApplyWorkspaceCommandOptions::new("ws-1", "refresh-1")
    };
    let response = server.client().apply_workspace_command(&options).await.unwrap();

    assert_eq!(response.status_code, 202);
    assert_eq!(response.result.activityid.as_deref(), Some("act-1"));

    let request = server.last_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/v1/workspaces/ws-1/apply");
    assert_eq!(request.header("refresh_token"), Some("refresh-1"));
    assert_eq!(request.header("delegated_token"), Some("delegated-1"));
    assert_eq!(
        request.json(),
        json!({"action_options": {"target": ["module.vpc"]}})
    );
}

#[tokio::test]
async fn test_plan_sends_action_options() {
    let server = MockServer::start().await;
    let options = PlanWorkspaceCommandOptions {
        action_options: Some(WorkspaceActivityOptionsTemplate {
            target: Some(vec!["module.vpc".into()]),
            tf_vars: Some(vec!["region=us-south".into()]),
        }),
        ..PlanWorkspaceCommandOptions::new("ws-1", "refresh-1")
    };
    server.client().plan_workspace_command(&options).await.unwrap();

    let plan = server.last_request();
    assert_eq!(plan.method, "POST");
    assert_eq!(plan.path, "/v1/workspaces/ws-1/plan");
    assert_eq!(plan.header("refresh_token"), Some("refresh-1"));
    assert_eq!(plan.header("delegated_token"), None);
    assert_eq!(
        plan.json(),
        json!({"action_options": {"target": ["module.vpc"], "tf_vars": ["region=us-south"]}})
    );
}

#[tokio::test]
async fn test_refresh_has_no_body() {
    let server = MockServer::start().await;
    server
        .client()
        .refresh_workspace_command(&RefreshWorkspaceCommandOptions::new("ws-1", "refresh-1"))
        .await
        .unwrap();

    let refresh = server.last_request();
    assert_eq!(refresh.method, "PUT");
    assert_eq!(refresh.path, "/v1/workspaces/ws-1/refresh");
    assert!(refresh.body.is_empty());
}

#[tokio::test]
async fn test_workspace_commands_require_refresh_token() {
    let server = MockServer::start().await;
    let err = server
        .client()
        .destroy_workspace_command(&DestroyWorkspaceCommandOptions::new("ws-1", " "))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_activities_listing_and_stop() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(
        200,
        json!({
            "workspace_id": "ws-1",
            "actions": [{"action_id": "act-1", "name": "PLAN", "status": "COMPLETED"}]
        }),
    ));
    let client = server.client();

    let options = ListWorkspaceActivitiesOptions {
        limit: Some(5),
        ..ListWorkspaceActivitiesOptions::new("ws-1")
    };
    let activities = client.list_workspace_activities(&options).await.unwrap().result;
    let actions = activities.actions.unwrap();
    assert_eq!(actions[0].action_id.as_deref(), Some("act-1"));
    assert_eq!(server.last_request().query_param("limit").as_deref(), Some("5"));

    server.enqueue(MockResponse::json(202, json!({"activityid": "act-1"})));
    client
        .delete_workspace_activity(&DeleteWorkspaceActivityOptions::new("ws-1", "act-1"))
        .await
        .unwrap();
    let request = server.last_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/v1/workspaces/ws-1/actions/act-1");
    assert_eq!(request.operation_id().as_deref(), Some("DeleteWorkspaceActivity"));
}

#[tokio::test]
async fn test_service_error_is_reported() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(
        404,
        json!({"errors": [{"message": "Workspace not found"}]}),
    ));

    let err = server
        .client()
        .get_workspace(&GetWorkspaceOptions::new("missing"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("Workspace not found"));
}

#[tokio::test]
async fn test_bulk_deletion_job() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(200, json!({"job": "delete", "job_id": "wj-1"})));
    let client = server.client();

    let options = CreateWorkspaceDeletionJobOptions {
        workspaces: Some(vec!["ws-1".into(), "ws-2".into()]),
        new_delete_workspaces: Some(true),
        new_destroy_resources: Some(false),
        ..CreateWorkspaceDeletionJobOptions::new("refresh-1")
    };
    let response = client.create_workspace_deletion_job(&options).await.unwrap();
    assert_eq!(response.result.job_id.as_deref(), Some("wj-1"));

    let request = server.last_request();
    assert_eq!(request.path, "/v1/workspace_jobs");
    assert_eq!(request.header("refresh_token"), Some("refresh-1"));
    assert_eq!(
        request.json(),
        json!({
            "workspaces": ["ws-1", "ws-2"],
            "delete_workspaces": true,
            "destroy_resources": false
        })
    );

    client
        .get_workspace_deletion_job_status(&GetWorkspaceDeletionJobStatusOptions::new("wj-1"))
        .await
        .unwrap();
    assert_eq!(server.last_request().path, "/v1/workspace_jobs/wj-1/status");
}
