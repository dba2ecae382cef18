use std::str::FromStr;

use anyhow::{Context, Result};
use taskboard::{build_router, serve};
use taskboard_app::{
    AsyncTaskService, ProjectConfig, StorageConfig, TaskFilterBuilder, TaskService, TaskStore,
};
use taskboard_core::{CreateTaskRequest, Priority, Task, TaskFilter, TaskId, UpdateTaskRequest};
use taskboard_store_sqlite::SqliteStore;

use crate::{Command, LsFormat};

pub fn run(command: Command, config: ProjectConfig) -> Result<()> {
    let store = open_store(&config.storage)?;
    let service = TaskService::new(store, config.categories);

    match command {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or(config.server.bind);
            if config.storage.is_in_memory() {
                tracing::warn!("serving an in-memory store; tasks are lost on exit");
            }
            let router = build_router(AsyncTaskService::new(service), config.server.cors);
            tokio::runtime::Runtime::new()?.block_on(serve(addr, router))
        }
        Command::Add {
            title,
            description,
            category,
            priority,
            status,
        } => add(
            &service,
            CreateTaskRequest {
                title: Some(title),
                description,
                category,
                priority,
                status,
                is_deleted: None,
            },
        ),
        Command::Ls {
            status,
            priority,
            category,
            format,
        } => {
            let filter = TaskFilterBuilder::new()
                .with_status(status.as_deref())
                .with_priority(priority.as_deref())
                .with_category(category.as_deref())
                .build();
            ls(&service, &filter, format)
        }
        Command::Update {
            task,
            title,
            description,
            category,
            priority,
            status,
        } => update(
            &service,
            &task,
            UpdateTaskRequest {
                title,
                description,
                category,
                priority,
                status,
            },
        ),
        Command::Rm { task } => rm(&service, &task),
    }
}

fn add<S: TaskStore>(service: &TaskService<S>, request: CreateTaskRequest) -> Result<()> {
    let outcome = service.create_from_request(request)?;
    println!("created task: {}", outcome.inserted_id);
    Ok(())
}

fn ls<S: TaskStore>(service: &TaskService<S>, filter: &TaskFilter, format: LsFormat) -> Result<()> {
    let tasks = service.list(filter)?;
    match format {
        LsFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
        LsFormat::Table => render_task_table(&tasks, filter),
    }
    Ok(())
}

fn update<S: TaskStore>(
    service: &TaskService<S>,
    task: &str,
    request: UpdateTaskRequest,
) -> Result<()> {
    let id = parse_task_id(task)?;
    let updated = service.update_from_request(id, request)?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

fn rm<S: TaskStore>(service: &TaskService<S>, task: &str) -> Result<()> {
    let id = parse_task_id(task)?;
    service.delete(id)?;
    println!("deleted task: {id}");
    Ok(())
}

fn open_store(storage: &StorageConfig) -> Result<SqliteStore> {
    if storage.is_in_memory() {
        return Ok(SqliteStore::open_in_memory()?);
    }
    SqliteStore::open(&storage.path)
        .with_context(|| format!("failed to open database {}", storage.path.display()))
}

fn render_task_table(tasks: &[Task], filter: &TaskFilter) {
    if tasks.is_empty() {
        if filter.is_empty() {
            println!("No tasks found");
        } else {
            println!("No tasks matched the provided filters");
        }
        return;
    }

    println!("ID | Status | Priority | Category | Title");
    println!("-- | ------ | -------- | -------- | -----");
    for task in tasks {
        println!(
            "{} | {} | {} | {} | {}",
            task.id,
            task.status,
            task.priority.map_or("-", Priority::as_str),
            task.category.as_deref().unwrap_or("-"),
            task.title
        );
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId> {
    TaskId::from_str(raw).with_context(|| format!("Invalid task id: {raw}"))
}
