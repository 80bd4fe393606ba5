//! Action, job, blueprint, inventory and resource query operations

use schematics::models::{
    ExternalSource, GitSource, ResourceQuery, ResourceQueryParam, VariableData,
};
use schematics::operations::*;
use schematics::CoreError;
use serde_json::json;

mod common;
use common::{MockResponse, MockServer};

#[tokio::test]
async fn test_create_action_body() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(201, json!({"id": "act-1", "name": "ping"})));

    let options = CreateActionOptions {
        name: Some("ping".into()),
        location: Some("us-east".into()),
        source: Some(ExternalSource {
            git: Some(GitSource {
                git_repo_url: Some("https://github.com/example/playbooks".into()),
                ..Default::default()
            }),
            ..ExternalSource::new("git_hub")
        }),
        command_parameter: Some("ping.yml".into()),
        inputs: Some(vec![VariableData::new("hosts", "all")]),
        x_github_token: Some("ghp".into()),
        ..Default::default()
    };
    let response = server.client().create_action(&options).await.unwrap();
    assert_eq!(response.status_code, 201);
    assert_eq!(response.result.id.as_deref(), Some("act-1"));

    let request = server.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v2/actions");
    assert_eq!(request.header("x-github-token"), Some("ghp"));
    assert_eq!(
        request.json(),
        json!({
            "name": "ping",
            "location": "us-east",
            "source": {
                "source_type": "git_hub",
                "git": {"git_repo_url": "https://github.com/example/playbooks"}
            },
            "command_parameter": "ping.yml",
            "inputs": [{"name": "hosts", "value": "all"}]
        })
    );
}

#[tokio::test]
async fn test_list_actions_query() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(
        200,
        json!({"total_count": 1, "actions": [{"id": "act-1", "name": "ping"}]}),
    ));

    let options = ListActionsOptions {
        sort: Some("-name".into()),
        profile: Some("summary".into()),
        ..Default::default()
    };
    let list = server.client().list_actions(&options).await.unwrap().result;
    assert_eq!(list.total_count, Some(1));

    let request = server.last_request();
    assert_eq!(request.query_param("sort").as_deref(), Some("-name"));
    assert_eq!(request.query_param("profile").as_deref(), Some("summary"));
    assert_eq!(request.query_param("offset"), None);
}

#[tokio::test]
async fn test_delete_action_headers() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::empty(204));

    let options = DeleteActionOptions {
        force: Some(true),
        propagate: Some(false),
        ..DeleteActionOptions::new("act-1")
    };
    let response = server.client().delete_action(&options).await.unwrap();
    assert_eq!(response.status_code, 204);

    let request = server.last_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/v2/actions/act-1");
    assert_eq!(request.header("force"), Some("true"));
    assert_eq!(request.header("propagate"), Some("false"));
}

#[tokio::test]
async fn test_update_action_and_upload() {
    let server = MockServer::start().await;
    let client = server.client();

    let options = UpdateActionOptions {
        description: Some("new".into()),
        ..UpdateActionOptions::new("act-1")
    };
    client.update_action(&options).await.unwrap();
    let request = server.last_request();
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.json(), json!({"description": "new"}));

    client
        .upload_template_tar_action(&UploadTemplateTarActionOptions::new("act-1", b"x".to_vec()))
        .await
        .unwrap();
    let request = server.last_request();
    assert_eq!(request.path, "/v2/actions/act-1/template_repo_upload");
    assert_eq!(request.operation_id().as_deref(), Some("UploadTemplateTarAction"));
    assert!(request.body_text().contains("filename=\"playbook.tar\""));
}

#[tokio::test]
async fn test_create_job_requires_refresh_token() {
    let server = MockServer::start().await;
    let err = server
        .client()
        .create_job(&CreateJobOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_create_job() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(
        201,
        json!({
            "id": "job-1",
            "command_name": "ansible_playbook_run",
            "status": {"action_job_status": {"status_code": "job_pending"}}
        }),
    ));

    let options = CreateJobOptions {
        command_object: Some("action".into()),
        command_object_id: Some("act-1".into()),
        command_name: Some("ansible_playbook_run".into()),
        ..CreateJobOptions::new("refresh-1")
    };
    let job = server.client().create_job(&options).await.unwrap().result;
    assert_eq!(job.id.as_deref(), Some("job-1"));

    let request = server.last_request();
    assert_eq!(request.path, "/v2/jobs");
    assert_eq!(request.header("refresh_token"), Some("refresh-1"));
    assert_eq!(
        request.json(),
        json!({
            "command_object": "action",
            "command_object_id": "act-1",
            "command_name": "ansible_playbook_run"
        })
    );
}

#[tokio::test]
async fn test_list_jobs_filters() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(200, json!({"total_count": 0, "jobs": []})));

    let options = ListJobsOptions {
        resource: Some("workspace".into()),
        workspace_id: Some("ws-1".into()),
        list: Some("all".into()),
        ..Default::default()
    };
    server.client().list_jobs(&options).await.unwrap();

    let request = server.last_request();
    assert_eq!(request.path, "/v2/jobs");
    assert_eq!(request.query_param("resource").as_deref(), Some("workspace"));
    assert_eq!(request.query_param("workspace_id").as_deref(), Some("ws-1"));
    assert_eq!(request.query_param("list").as_deref(), Some("all"));
    assert_eq!(request.query_param("action_id"), None);
}

#[tokio::test]
async fn test_job_logs_and_files() {
    let server = MockServer::start().await;
    let client = server.client();

    server.enqueue(MockResponse::json(200, json!({"job_id": "job-1", "details": "ok"})));
    let logs = client
        .list_job_logs(&ListJobLogsOptions::new("job-1"))
        .await
        .unwrap()
        .result;
    assert_eq!(logs.details.as_deref(), Some("ok"));
    assert_eq!(server.last_request().path, "/v2/jobs/job-1/logs");

    let err = client
        .get_job_files(&GetJobFilesOptions::new("job-1", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    server.enqueue(MockResponse::json(200, json!({"file_type": "plan_json"})));
    client
        .get_job_files(&GetJobFilesOptions::new("job-1", "plan_json"))
        .await
        .unwrap();
    let request = server.last_request();
    assert_eq!(request.path, "/v2/jobs/job-1/files");
    assert_eq!(request.query_param("file_type").as_deref(), Some("plan_json"));
}

#[tokio::test]
async fn test_delete_job() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::empty(204));

    let options = DeleteJobOptions {
        force: Some(true),
        ..DeleteJobOptions::new("job-1", "refresh-1")
    };
    server.client().delete_job(&options).await.unwrap();

    let request = server.last_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.header("refresh_token"), Some("refresh-1"));
    assert_eq!(request.header("force"), Some("true"));
    assert_eq!(request.header("propagate"), None);
}

#[tokio::test]
async fn test_blueprint_operations() {
    let server = MockServer::start().await;
    let client = server.client();

    let options = ReplaceBlueprintOptions {
        name: Some("stack".into()),
        profile: Some("detailed".into()),
        ..ReplaceBlueprintOptions::new("bp-1")
    };
    client.replace_blueprint(&options).await.unwrap();
    let request = server.last_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/v2/blueprints/bp-1");
    assert_eq!(request.query_param("profile").as_deref(), Some("detailed"));
    assert_eq!(request.json(), json!({"name": "stack"}));

    server.enqueue(MockResponse::empty(204));
    let options = DeleteBlueprintOptions {
        destroy: Some(true),
        ..DeleteBlueprintOptions::new("bp-1")
    };
    client.delete_blueprint(&options).await.unwrap();
    let request = server.last_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.query_param("destroy").as_deref(), Some("true"));

    let options = UploadTemplateTarBlueprintOptions {
        source: Some("blueprint".into()),
        file_name: Some("landing-zone.tar".into()),
        ..UploadTemplateTarBlueprintOptions::new("bp-1", b"tar".to_vec())
    };
    client.upload_template_tar_blueprint(&options).await.unwrap();
    let request = server.last_request();
    assert_eq!(request.path, "/v2/blueprints/bp-1/template_repo_upload");
    assert_eq!(request.query_param("source").as_deref(), Some("blueprint"));
    assert!(request.body_text().contains("filename=\"landing-zone.tar\""));
}

#[tokio::test]
async fn test_inventory_operations() {
    let server = MockServer::start().await;
    let client = server.client();

    let options = CreateInventoryOptions {
        name: Some("hosts".into()),
        inventories_ini: Some("[web]\n10.0.0.1".into()),
        ..Default::default()
    };
    client.create_inventory(&options).await.unwrap();
    let request = server.last_request();
    assert_eq!(request.path, "/v2/inventories");
    assert_eq!(
        request.json(),
        json!({"name": "hosts", "inventories_ini": "[web]\n10.0.0.1"})
    );

    let options = UpdateInventoryOptions {
        resource_queries: Some(vec!["q-1".into()]),
        ..UpdateInventoryOptions::new("inv-1")
    };
    client.update_inventory(&options).await.unwrap();
    let request = server.last_request();
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.path, "/v2/inventories/inv-1");

    client
        .replace_inventory(&ReplaceInventoryOptions::new("inv-1"))
        .await
        .unwrap();
    assert_eq!(server.last_request().method, "PUT");
    assert_eq!(server.last_request().operation_id().as_deref(), Some("ReplaceInventory"));
}

#[tokio::test]
async fn test_resource_query_operations() {
    let server = MockServer::start().await;
    let client = server.client();

    let options = CreateResourceQueryOptions {
        r#type: Some("vsi".into()),
        name: Some("web".into()),
        queries: Some(vec![ResourceQuery {
            query_type: Some("workspaces".into()),
            query_condition: Some(vec![ResourceQueryParam {
                name: Some("workspace-id".into()),
                value: Some("ws-1".into()),
                description: None,
            }]),
            query_select: None,
        }]),
    };
    client.create_resource_query(&options).await.unwrap();
    let request = server.last_request();
    assert_eq!(request.path, "/v2/resources_query");
    assert_eq!(request.json()["type"], "vsi");
    assert_eq!(
        request.json()["queries"][0]["query_condition"][0]["value"],
        "ws-1"
    );

    client
        .execute_resource_query(&ExecuteResourceQueryOptions::new("q-1"))
        .await
        .unwrap();
    let request = server.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v2/resources_query/q-1");
    assert!(request.body.is_empty());

    server.enqueue(MockResponse::empty(204));
    let options = DeleteResourcesQueryOptions {
        propagate: Some(true),
        ..DeleteResourcesQueryOptions::new("q-1")
    };
    client.delete_resources_query(&options).await.unwrap();
    assert_eq!(server.last_request().header("propagate"), Some("true"));
}
