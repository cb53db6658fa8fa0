use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failures while parsing a repeat rule or resolving its next date.
///
/// Every variant is a deterministic consequence of the input; none of them is
/// worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("empty repeat rule")]
    EmptyRule,

    #[error("unsupported repeat rule: '{0}'")]
    UnsupportedRuleKind(String),

    #[error("invalid day interval: {0}")]
    InvalidInterval(String),

    #[error("yearly rule takes no parameters: '{0}'")]
    InvalidYearlyRule(String),

    #[error("weekday must be between 1 and 7: '{0}'")]
    InvalidWeekday(String),

    #[error("weekdays are required")]
    MissingWeekdays,

    #[error("invalid day of month: '{0}'")]
    InvalidMonthDay(String),

    #[error("invalid month: '{0}'")]
    InvalidMonth(String),

    #[error("invalid start date format: '{0}'")]
    InvalidStartDate(String),

    #[error("cannot find next date for rule '{0}'")]
    NoMatchFound(String),
}
