use clap::{Parser, Subcommand};

/// A personal task scheduler with compact repeat rules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the next date of a repeat rule
    NextDate(NextDateCommand),
    #[command(flatten)]
    Task(TaskCommands),
}

/// Commands that work on the task database.
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks ordered by date
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as done
    Done(DoneCommand),
    /// Delete a task
    Delete(DeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct NextDateCommand {
    /// The task's current date (YYYYMMDD)
    #[arg(long)]
    pub date: String,
    /// The repeat rule, e.g. "d 7", "y", "w 1,3", "m -1 2,8"
    #[arg(long, allow_hyphen_values = true)]
    pub repeat: String,
    /// Reference date (YYYYMMDD), defaults to today
    #[arg(long)]
    pub now: Option<String>,
    /// Report errors as a JSON object
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The date of the task (YYYYMMDD, DD.MM.YYYY or natural language)
    #[clap(short, long)]
    pub date: Option<String>,
    /// A free-form comment
    #[clap(short, long, default_value = "")]
    pub comment: String,
    /// Repeat rule
    #[clap(short, long, default_value = "", allow_hyphen_values = true)]
    pub repeat: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Text in the title or comment, or a DD.MM.YYYY date
    #[clap(short, long)]
    pub search: Option<String>,
    /// Maximum number of tasks to show
    #[clap(short, long)]
    pub limit: Option<u32>,
    /// Print tasks as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task
    pub id: i64,
    /// Print the task as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub repeat: Option<String>,
    #[arg(long, conflicts_with = "repeat", help = "Remove the repeat rule (make it a one-off task)")]
    pub repeat_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to mark as done
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Delete without asking for confirmation
    #[arg(long, short)]
    pub force: bool,
}
