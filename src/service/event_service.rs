use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use crate::calendar::{self, Layout, Placement, WeekWindow};
use crate::error::{CalendarError, EventStoreError};
use crate::models::event::{Event, EventKind, validate_events};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub region: Option<String>,
    pub kinds: Vec<EventKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(region) = &self.region {
            if !event.region.eq_ignore_ascii_case(region.trim()) {
                return false;
            }
        }
        if !self.kinds.is_empty() && !self.kinds.contains(&event.kind) {
            return false;
        }
        if let Some(from) = self.from {
            if event.end_date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if event.start_date > to {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutView {
    pub event_id: String,
    pub title: String,
    pub kind: EventKind,
    pub venue: String,
    pub track: usize,
    pub start_day: usize,
    pub end_day: usize,
    pub duration: usize,
}

impl Placement for LayoutView {
    fn track(&self) -> usize {
        self.track
    }

    fn start_day(&self) -> usize {
        self.start_day
    }

    fn end_day(&self) -> usize {
        self.end_day
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub track_count: usize,
    pub layouts: Vec<LayoutView>,
}

#[derive(Debug, Default)]
pub struct EventDirectory {
    events: Vec<Event>,
}

impl EventDirectory {
    /// Rejects the first event that ends before it starts.
    pub fn new(events: Vec<Event>) -> Result<Self, EventStoreError> {
        validate_events(&events)?;
        Ok(Self { events })
    }

    pub fn filter(&self, filter: &EventFilter) -> Vec<&Event> {
        self.events.iter().filter(|e| filter.matches(e)).collect()
    }

    pub fn regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self.events.iter().map(|e| e.region.clone()).collect();
        regions.sort();
        regions.dedup();
        regions
    }

    /// Events still running on or after `today`, soonest first.
    pub fn upcoming(&self, today: NaiveDate, limit: usize) -> Vec<&Event> {
        let mut upcoming: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.end_date >= today)
            .collect();
        upcoming.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.title.cmp(&b.title))
        });
        upcoming.truncate(limit);
        upcoming
    }

    pub fn week_view(
        &self,
        filter: &EventFilter,
        week: WeekWindow,
    ) -> Result<WeekView, CalendarError> {
        let selected = self.filter(filter);
        let layouts = calendar::pack_week(&selected, &week)?;
        debug!(
            "event=week_packed week_start={} items={} tracks={}",
            week.start(),
            layouts.len(),
            calendar::track_count(&layouts)
        );
        Ok(WeekView {
            week_start: week.start(),
            week_end: week.end(),
            track_count: calendar::track_count(&layouts),
            layouts: layouts.iter().map(to_view).collect(),
        })
    }

    pub fn month_view(
        &self,
        filter: &EventFilter,
        year: i32,
        month: u32,
    ) -> Result<Vec<WeekView>, CalendarError> {
        let (first, last) = calendar::month_weeks(year, month)?;
        let selected = self.filter(filter);
        let weeks = calendar::pack_weeks(&selected, first, last)?;
        Ok(weeks
            .iter()
            .map(|week| WeekView {
                week_start: week.week.start(),
                week_end: week.week.end(),
                track_count: week.track_count,
                layouts: week.layouts.iter().map(to_view).collect(),
            })
            .collect())
    }
}

fn to_view(layout: &Layout<'_, &Event>) -> LayoutView {
    LayoutView {
        event_id: layout.item.id.clone(),
        title: layout.item.title.clone(),
        kind: layout.item.kind,
        venue: layout.item.venue.clone(),
        track: layout.track,
        start_day: layout.start_day,
        end_day: layout.end_day,
        duration: layout.duration,
    }
}
