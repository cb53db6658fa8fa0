use chrono_humanize::{Accuracy, HumanTime, Tense};
use comfy_table::{Attribute, Cell, Color, Row, Table};
use sched_core::date::CalendarDate;
use sched_core::models::Task;

/// Relative description of `date` as seen from `today`.
pub fn humanize_due(date: CalendarDate, today: CalendarDate) -> String {
    let delta = date.as_naive() - today.as_naive();
    if delta.num_days() == 0 {
        return "today".to_string();
    }
    let tense = if delta.num_days() > 0 { Tense::Future } else { Tense::Past };
    HumanTime::from(delta).to_text_en(Accuracy::Rough, tense)
}

fn due_cell(date: CalendarDate, today: CalendarDate) -> Cell {
    let text = format!("{} ({})", date, humanize_due(date, today));
    if today.is_after(date) {
        Cell::new(text).fg(Color::Red) // Overdue
    } else if date == today {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text)
    }
}

pub fn display_tasks(tasks: &[Task], today: CalendarDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Date", "Repeat", "Comment"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));

        let mut title = String::new();
        if task.is_recurring() {
            title.push_str("↻ ");
        }
        title.push_str(&task.title);
        row.add_cell(Cell::new(title).add_attribute(Attribute::Bold));

        row.add_cell(due_cell(task.date, today));
        row.add_cell(Cell::new(if task.is_recurring() { task.repeat.as_str() } else { "None" }));
        row.add_cell(Cell::new(&task.comment).fg(Color::DarkGrey));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_task(task: &Task, today: CalendarDate) {
    let mut table = Table::new();
    table.add_row(vec![Cell::new("ID"), Cell::new(task.id)]);
    table.add_row(vec![Cell::new("Title"), Cell::new(&task.title)]);
    table.add_row(vec![Cell::new("Date"), due_cell(task.date, today)]);
    table.add_row(vec![
        Cell::new("Repeat"),
        Cell::new(if task.is_recurring() { task.repeat.as_str() } else { "None" }),
    ]);
    table.add_row(vec![Cell::new("Comment"), Cell::new(&task.comment)]);

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_humanize_due() {
        let today = date("20240115");
        assert_eq!(humanize_due(today, today), "today");
        assert_eq!(humanize_due(date("20240117"), today), "in 2 days");
        assert_eq!(humanize_due(date("20240112"), today), "3 days ago");
    }
}
