use anyhow::Result;
use sched_core::date::CalendarDate;
use sched_core::models::UpdateTaskData;
use sched_core::repository::TaskRepository;

use crate::cli::EditCommand;
use crate::parser::parse_local_date;

pub async fn edit_task(repo: &impl TaskRepository, command: EditCommand) -> Result<()> {
    let date = command.date.as_deref().map(parse_local_date).transpose()?;

    let repeat = if command.repeat_clear {
        Some(String::new())
    } else {
        command.repeat
    };

    let update_data = UpdateTaskData {
        title: command.title,
        date,
        comment: command.comment,
        repeat,
    };

    let updated_task = repo.update_task(command.id, update_data, CalendarDate::today()).await?;
    println!("Updated task with ID: {} (date {})", updated_task.id, updated_task.date);

    Ok(())
}
