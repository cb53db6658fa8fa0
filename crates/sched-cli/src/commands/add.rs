use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use sched_core::date::CalendarDate;
use sched_core::models::NewTaskData;
use sched_core::repository::TaskRepository;

use crate::cli::AddCommand;
use crate::parser::parse_local_date;

pub async fn add_task(repo: &impl TaskRepository, command: AddCommand) -> Result<()> {
    let date = command.date.as_deref().map(parse_local_date).transpose()?;

    let new_task_data = NewTaskData {
        title: command.title,
        date,
        comment: command.comment,
        repeat: command.repeat,
    };

    let added_task = repo.add_task(new_task_data, CalendarDate::today()).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    println!("{} Created task: {}", "✓".style(success_style), added_task.title.bright_white().bold());
    println!("  {} Task ID: {}", "→".style(info_style), added_task.id.to_string().yellow());
    println!("  {} Date: {}", "→".style(info_style), added_task.date.to_string().cyan());
    if added_task.is_recurring() {
        println!("  {} Repeats: {}", "→".style(info_style), added_task.repeat);
    }

    Ok(())
}
