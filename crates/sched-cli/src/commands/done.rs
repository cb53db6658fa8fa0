use anyhow::Result;
use sched_core::date::CalendarDate;
use sched_core::models::CompletionResult;
use sched_core::repository::TaskRepository;

use crate::cli::DoneCommand;

pub async fn done_task(repo: &impl TaskRepository, command: DoneCommand) -> Result<()> {
    match repo.complete_task(command.id, CalendarDate::today()).await? {
        CompletionResult::Removed(task) => {
            println!("Completed task: '{}'", task.title);
        }
        CompletionResult::Rescheduled { task, previous } => {
            println!("Completed task: '{}' (was due {})", task.title, previous);
            println!("Next occurrence on {}", task.date);
        }
    }

    Ok(())
}
