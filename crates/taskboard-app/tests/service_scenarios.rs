//! End-to-end task lifecycle against a real SQLite store.

use anyhow::Result;
use taskboard_app::{CategoryConfig, ProjectConfig, TaskService, TaskServiceError};
use taskboard_core::{
    CreateTaskRequest, Priority, TaskFilter, TaskStatus, UpdateTaskRequest, ValidationError,
};
use taskboard_store_sqlite::SqliteStore;
use tempfile::TempDir;

fn service() -> Result<TaskService<SqliteStore>> {
    Ok(TaskService::new(
        SqliteStore::open_in_memory()?,
        CategoryConfig::unrestricted(),
    ))
}

fn create(service: &TaskService<SqliteStore>, json: &str) -> Result<taskboard_core::TaskId> {
    let request: CreateTaskRequest = serde_json::from_str(json)?;
    Ok(service.create_from_request(request)?.inserted_id)
}

#[test]
fn buy_milk_lifecycle() -> Result<()> {
    let service = service()?;
    let id = create(&service, r#"{"title":"Buy milk"}"#)?;

    let listed = service.list(&TaskFilter::default())?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].status, TaskStatus::Pending);
    assert!(!listed[0].is_deleted);

    let completed = service.update_from_request(
        id,
        UpdateTaskRequest {
            status: Some("completed".into()),
            ..UpdateTaskRequest::default()
        },
    )?;
    assert_eq!(completed.status, TaskStatus::Completed);
    assert_eq!(completed.title, "Buy milk");

    assert!(matches!(
        service.update_from_request(id, UpdateTaskRequest::default()),
        Err(TaskServiceError::NotFoundOrNoChange(_))
    ));

    service.delete(id)?;
    assert!(service.list(&TaskFilter::default())?.is_empty());
    assert!(matches!(service.delete(id), Err(TaskServiceError::NotFound(_))));
    Ok(())
}

#[test]
fn repeating_the_same_update_reports_no_change() -> Result<()> {
    let service = service()?;
    let id = create(&service, r#"{"title":"Walk","priority":"low"}"#)?;
    let raise = UpdateTaskRequest {
        priority: Some("high".into()),
        ..UpdateTaskRequest::default()
    };

    let task = service.update_from_request(id, raise.clone())?;
    assert_eq!(task.priority, Some(Priority::High));
    assert!(matches!(
        service.update_from_request(id, raise),
        Err(TaskServiceError::NotFoundOrNoChange(_))
    ));
    Ok(())
}

#[test]
fn status_filter_returns_only_active_matches() -> Result<()> {
    let service = service()?;
    let done = create(&service, r#"{"title":"Done","status":"completed"}"#)?;
    let removed = create(&service, r#"{"title":"Removed","status":"completed"}"#)?;
    create(&service, r#"{"title":"Open"}"#)?;
    service.delete(removed)?;

    let filter = TaskFilter {
        status: Some("completed".into()),
        ..TaskFilter::default()
    };
    let listed = service.list(&filter)?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, done);

    let unknown = TaskFilter {
        status: Some("archived".into()),
        ..TaskFilter::default()
    };
    assert!(service.list(&unknown)?.is_empty());
    Ok(())
}

#[test]
fn invalid_enum_values_are_validation_errors() -> Result<()> {
    let service = service()?;
    let Err(err) = create(&service, r#"{"title":"x","status":"done"}"#) else {
        panic!("invalid status must be rejected");
    };
    assert!(matches!(
        err.downcast_ref::<TaskServiceError>(),
        Some(TaskServiceError::Validation(ValidationError::InvalidStatus(_)))
    ));

    let id = create(&service, r#"{"title":"y"}"#)?;
    let result = service.update_from_request(
        id,
        UpdateTaskRequest {
            priority: Some("urgent".into()),
            ..UpdateTaskRequest::default()
        },
    );
    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(ValidationError::InvalidPriority(_)))
    ));
    Ok(())
}

#[test]
fn configured_categories_restrict_create_and_update() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("taskboard.toml");
    std::fs::write(&path, "[categories]\nallowed = [\"work\", \"personal\"]\n")?;
    let config = ProjectConfig::load(&path)?;

    let service = TaskService::new(SqliteStore::open_in_memory()?, config.categories);
    let id = create(&service, r#"{"title":"Report","category":"work"}"#)?;
    assert!(create(&service, r#"{"title":"Gym","category":"health"}"#).is_err());

    let result = service.update_from_request(
        id,
        UpdateTaskRequest {
            category: Some("health".into()),
            ..UpdateTaskRequest::default()
        },
    );
    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(ValidationError::UnknownCategory { .. }))
    ));
    Ok(())
}
