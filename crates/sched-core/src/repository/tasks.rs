use crate::date::CalendarDate;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, TaskRow, TaskSearch, UpdateTaskData};
use crate::recurrence::RecurrenceRule;
use crate::repository::{into_task, SqliteRepository};
use crate::schedule::resolve_task_date;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, Transaction};
use tracing::{debug, info};

const SELECT_TASK: &str = "SELECT id, date, title, comment, repeat FROM scheduler";

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData, today: CalendarDate) -> Result<Task, CoreError> {
        let title = require_title(&data.title)?;
        let repeat = data.repeat.trim().to_string();
        let date = resolve_task_date(today, data.date.as_deref(), &repeat)?;

        let id = sqlx::query("INSERT INTO scheduler (date, title, comment, repeat) VALUES ($1, $2, $3, $4)")
            .bind(date.to_string())
            .bind(&title)
            .bind(&data.comment)
            .bind(&repeat)
            .execute(self.pool())
            .await?
            .last_insert_rowid();

        info!(id, %date, repeat = %repeat, "task added");
        Ok(Task {
            id,
            date,
            title,
            comment: data.comment,
            repeat,
        })
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let row: Option<TaskRow> = sqlx::query_as(&format!("{SELECT_TASK} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.map(into_task).transpose()
    }

    async fn find_tasks(&self, search: Option<&TaskSearch>, limit: u32) -> Result<Vec<Task>, CoreError> {
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_TASK);

        match search {
            Some(TaskSearch::Date(date)) => {
                query_builder.push(" WHERE date = ");
                query_builder.push_bind(date.to_string());
            }
            Some(TaskSearch::Text(text)) => {
                let pattern = format!("%{}%", escape_like(text));
                query_builder.push(" WHERE title LIKE ");
                query_builder.push_bind(pattern.clone());
                query_builder.push(" ESCAPE '\\' OR comment LIKE ");
                query_builder.push_bind(pattern);
                query_builder.push(" ESCAPE '\\'");
            }
            None => {}
        }

        query_builder.push(" ORDER BY date ASC, id ASC LIMIT ");
        query_builder.push_bind(i64::from(limit));

        let rows: Vec<TaskRow> = query_builder.build_query_as().fetch_all(self.pool()).await?;
        debug!(count = rows.len(), ?search, "tasks listed");
        rows.into_iter().map(into_task).collect()
    }

    async fn update_task(&self, id: i64, data: UpdateTaskData, today: CalendarDate) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let current = Self::find_task_by_id_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let title = match data.title {
            Some(title) => require_title(&title)?,
            None => current.title,
        };
        let repeat = data.repeat.map_or(current.repeat, |r| r.trim().to_string());
        let comment = data.comment.unwrap_or(current.comment);
        let raw_date = data.date.unwrap_or_else(|| current.date.to_string());
        let date = resolve_task_date(today, Some(&raw_date), &repeat)?;

        sqlx::query("UPDATE scheduler SET date = $1, title = $2, comment = $3, repeat = $4 WHERE id = $5")
            .bind(date.to_string())
            .bind(&title)
            .bind(&comment)
            .bind(&repeat)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(id, %date, "task updated");
        Ok(Task {
            id,
            date,
            title,
            comment,
            repeat,
        })
    }

    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM scheduler WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        info!(id, "task deleted");
        Ok(())
    }

    async fn complete_task(&self, id: i64, today: CalendarDate) -> Result<CompletionResult, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task = Self::find_task_by_id_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        if !task.is_recurring() {
            sqlx::query("DELETE FROM scheduler WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            info!(id, "one-off task done and removed");
            return Ok(CompletionResult::Removed(task));
        }

        let rule: RecurrenceRule = task.repeat.parse()?;
        let next = rule.next_after(today, task.date)?;

        sqlx::query("UPDATE scheduler SET date = $1 WHERE id = $2")
            .bind(next.to_string())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(id, previous = %task.date, %next, "recurring task rescheduled");
        let previous = task.date;
        Ok(CompletionResult::Rescheduled {
            task: Task { date: next, ..task },
            previous,
        })
    }
}

impl SqliteRepository {
    pub(crate) async fn find_task_by_id_in_transaction(
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> Result<Option<Task>, CoreError> {
        let row: Option<TaskRow> = sqlx::query_as(&format!("{SELECT_TASK} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        row.map(into_task).transpose()
    }
}

/// Makes `%`, `_` and the escape character itself match literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn require_title(title: &str) -> Result<String, CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::InvalidInput("Title is required".to_string()));
    }
    Ok(title.to_string())
}
