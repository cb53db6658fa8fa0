use crate::date::CalendarDate;
use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, TaskRow, TaskSearch, UpdateTaskData};
use async_trait::async_trait;

pub mod tasks;

/// Default page size for task listings.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Storage operations for scheduled tasks.
///
/// Methods that place a task on the calendar take `today` explicitly so that
/// date policy stays deterministic under test.
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData, today: CalendarDate) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn find_tasks(&self, search: Option<&TaskSearch>, limit: u32) -> Result<Vec<Task>, CoreError>;
    async fn update_task(&self, id: i64, data: UpdateTaskData, today: CalendarDate) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<(), CoreError>;
    async fn complete_task(&self, id: i64, today: CalendarDate) -> Result<CompletionResult, CoreError>;
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

pub(crate) fn into_task(row: TaskRow) -> Result<Task, CoreError> {
    let id = row.id;
    Task::try_from(row)
        .map_err(|e| CoreError::InvalidInput(format!("stored task {id} is corrupt: {e}")))
}
