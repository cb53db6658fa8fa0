use anyhow::Result;
use sched_core::date::CalendarDate;
use sched_core::error::CoreError;
use sched_core::repository::TaskRepository;

use crate::cli::ShowCommand;
use crate::views::table::display_task;

pub async fn show_task(repo: &impl TaskRepository, command: ShowCommand) -> Result<()> {
    let task = repo
        .find_task_by_id(command.id)
        .await?
        .ok_or_else(|| CoreError::NotFound(command.id.to_string()))?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        display_task(&task, CalendarDate::today());
    }

    Ok(())
}
