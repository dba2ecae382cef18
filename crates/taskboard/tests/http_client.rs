//! `HttpTaskApi` against a live server on an ephemeral port.

use anyhow::Result;
use taskboard::build_router;
use taskboard_app::{AsyncTaskService, CategoryConfig, TaskService};
use taskboard_client::{ClientError, HttpTaskApi, TaskApi, TaskClient};
use taskboard_core::{NewTask, Priority, TaskFilter, TaskId, TaskPatch, TaskStatus};
use taskboard_store_sqlite::SqliteStore;
use tempfile::TempDir;

async fn spawn_server(store: SqliteStore) -> Result<String> {
    let service = AsyncTaskService::new(TaskService::new(store, CategoryConfig::unrestricted()));
    let app = build_router(service, true);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            panic!("serve app: {err}");
        }
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn client_round_trips_through_http() -> Result<()> {
    let base = spawn_server(SqliteStore::open_in_memory()?).await?;
    let mut client = TaskClient::new(HttpTaskApi::new(&base)?);

    let id = client
        .create(&NewTask::new("Buy milk").with_priority(Priority::Low))
        .await?
        .inserted_id;
    let tasks = client.tasks(&TaskFilter::default()).await?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].priority, Some(Priority::Low));

    let task = tasks[0].clone();
    let done = client.toggle_completed(&task).await?;
    assert_eq!(done.status, TaskStatus::Completed);

    let completed = TaskFilter {
        status: Some("completed".into()),
        ..TaskFilter::default()
    };
    assert_eq!(client.tasks(&completed).await?.len(), 1);

    let deleted = client.delete(id).await?;
    assert_eq!(deleted.message, "Task deleted successfully");
    assert!(client.tasks(&TaskFilter::default()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn http_errors_map_to_client_errors() -> Result<()> {
    let base = spawn_server(SqliteStore::open_in_memory()?).await?;
    let api = HttpTaskApi::new(&base)?;

    let missing = api.delete(TaskId::new()).await;
    assert!(matches!(missing, Err(ClientError::NotFound(message)) if message == "Task not found"));

    let blank = api.create(&NewTask::new("")).await;
    assert!(matches!(blank, Err(ClientError::Validation(_))));

    let id = api.create(&NewTask::new("same")).await?.inserted_id;
    let no_change = api.update(id, &TaskPatch::default()).await;
    assert!(matches!(
        no_change,
        Err(ClientError::NotFound(message)) if message == "Task not found or no changes made"
    ));
    Ok(())
}

#[tokio::test]
async fn tasks_persist_across_server_restarts() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("taskboard.db");

    let first = HttpTaskApi::new(&spawn_server(SqliteStore::open(&path)?).await?)?;
    let id = first.create(&NewTask::new("durable")).await?.inserted_id;

    let second = HttpTaskApi::new(&spawn_server(SqliteStore::open(&path)?).await?)?;
    let tasks = second.list(&TaskFilter::default()).await?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    Ok(())
}
