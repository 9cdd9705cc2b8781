use thiserror::Error;

pub type CalendarResult<T> = Result<T, CalendarError>;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("week_starts_on must be between 0 and 6, got {0}")]
    InvalidWeekStart(u8),

    #[error("number_of_months must be at least 1")]
    InvalidMonthCount,

    #[error("{field} must be at least 1")]
    ZeroDayLimit { field: &'static str },

    #[error("min_days ({min}) is greater than max_days ({max})")]
    InvalidDayBounds { min: usize, max: usize },

    #[error("min_value ({min}) is after max_value ({max})")]
    InvalidValueBounds { min: String, max: String },

    #[error("failed to parse YAML calendar config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON calendar config: {0}")]
    Json(#[from] serde_json::Error),
}
