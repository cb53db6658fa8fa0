use anyhow::Result;
use sched_core::date::CalendarDate;
use sched_core::models::TaskSearch;
use sched_core::repository::TaskRepository;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::views::table::display_tasks;

pub async fn list_tasks(repo: &impl TaskRepository, command: ListCommand, config: &Config) -> Result<()> {
    let search = command.search.as_deref().and_then(TaskSearch::parse);
    let limit = command.limit.unwrap_or(config.list_limit);

    let tasks = repo.find_tasks(search.as_ref(), limit).await?;

    if command.json {
        println!("{}", serde_json::json!({ "tasks": tasks }));
    } else {
        display_tasks(&tasks, CalendarDate::today());
    }

    Ok(())
}
