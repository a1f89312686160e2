use std::fs;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::DatedItem;
use crate::calendar::lanes::validate_range;
use crate::error::EventStoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Milonga,
    Practica,
    Class,
    Workshop,
    Festival,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Milonga => "milonga",
            EventKind::Practica => "practica",
            EventKind::Class => "class",
            EventKind::Workshop => "workshop",
            EventKind::Festival => "festival",
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "milonga" => Ok(EventKind::Milonga),
            "practica" => Ok(EventKind::Practica),
            "class" => Ok(EventKind::Class),
            "workshop" => Ok(EventKind::Workshop),
            "festival" => Ok(EventKind::Festival),
            other => Err(format!("unknown event kind `{}`", other)),
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Event {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    pub kind: EventKind,
    pub venue: String,
    pub region: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Event {
    pub fn is_single_day(&self) -> bool {
        self.start_date == self.end_date
    }
}

impl DatedItem for Event {
    fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    fn end_date(&self) -> NaiveDate {
        self.end_date
    }
}

pub fn parse_events(path: &str, content: &str) -> Result<Vec<Event>, EventStoreError> {
    let events: Vec<Event> =
        serde_json::from_str(content).map_err(|source| EventStoreError::Parse {
            path: path.to_string(),
            source,
        })?;
    validate_events(&events)?;
    Ok(events)
}

/// Fails on the first event ending before it starts, naming it by id and
/// by its position in `events`.
pub fn validate_events(events: &[Event]) -> Result<(), EventStoreError> {
    for (index, event) in events.iter().enumerate() {
        validate_range(index, event).map_err(|source| EventStoreError::Invalid {
            id: event.id.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Reads a JSON array of events, rejecting any record whose range ends
/// before it starts.
pub fn load_events(path: &str) -> Result<Vec<Event>, EventStoreError> {
    let content = fs::read_to_string(path).map_err(|source| EventStoreError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_events(path, &content)
}
