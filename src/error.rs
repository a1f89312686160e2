use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("item {index} ends on {end} before it starts on {start}")]
    InvalidRange {
        index: usize,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("week window {start}..={end} is not a 7 day span")]
    InvalidWeek { start: NaiveDate, end: NaiveDate },
    #[error("week around {date} falls outside the supported calendar")]
    OutOfRange { date: NaiveDate },
    #[error("no such month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}

#[derive(Debug, Error)]
pub enum EventStoreError {
    #[error("failed to read events file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse events file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid event `{id}`: {source}")]
    Invalid {
        id: String,
        #[source]
        source: CalendarError,
    },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no content in response")]
    Empty,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid config line {line}: {content}")]
    InvalidLine { line: usize, content: String },
    #[error("failed to read config file {path}: {reason}")]
    Unreadable { path: String, reason: String },
    #[error("invalid value for {key}: `{value}`")]
    InvalidValue { key: String, value: String },
}
