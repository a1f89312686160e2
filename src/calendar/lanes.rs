use chrono::NaiveDate;

use super::week::{WeekWindow, days_between};
use crate::error::CalendarError;

/// Anything with an inclusive calendar date range.
pub trait DatedItem {
    fn start_date(&self) -> NaiveDate;
    fn end_date(&self) -> NaiveDate;
}

impl<T: DatedItem + ?Sized> DatedItem for &T {
    fn start_date(&self) -> NaiveDate {
        (**self).start_date()
    }

    fn end_date(&self) -> NaiveDate {
        (**self).end_date()
    }
}

/// Part of an item's range clipped to one week, as day offsets in `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start_day: usize,
    pub end_day: usize,
}

impl Segment {
    pub fn duration(&self) -> usize {
        self.end_day - self.start_day + 1
    }

    /// Day-granular inclusive ranges: sharing a single day is an overlap.
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start_day <= other.end_day && other.start_day <= self.end_day
    }
}

/// Placement of one item in one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<'a, T> {
    pub item: &'a T,
    pub track: usize,
    pub start_day: usize,
    pub end_day: usize,
    pub duration: usize,
}

impl<T> Layout<'_, T> {
    pub fn segment(&self) -> Segment {
        Segment {
            start_day: self.start_day,
            end_day: self.end_day,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekLayout<'a, T> {
    pub week: WeekWindow,
    pub layouts: Vec<Layout<'a, T>>,
    pub track_count: usize,
}

pub fn validate_range<T: DatedItem>(index: usize, item: &T) -> Result<(), CalendarError> {
    let (start, end) = (item.start_date(), item.end_date());
    if end < start {
        return Err(CalendarError::InvalidRange { index, start, end });
    }
    Ok(())
}

/// Clips `item` to `week`, or `None` when the two do not overlap.
pub fn clip_to_week<T: DatedItem>(item: &T, week: &WeekWindow) -> Option<Segment> {
    let (start, end) = (item.start_date(), item.end_date());
    if start > week.end() || end < week.start() {
        return None;
    }
    let segment_start = start.max(week.start());
    let segment_end = end.min(week.end());
    Some(Segment {
        start_day: days_between(week.start(), segment_start) as usize,
        end_day: days_between(week.start(), segment_end) as usize,
    })
}

/// Assigns every item touching `week` to the lowest free track.
///
/// Segments are placed by ascending start day, longer segments first on
/// ties, with the original order kept for identical ranges. A track is free
/// when its last segment ended strictly before the new one starts. The
/// result is in placement order and carries no track limit.
///
/// # Errors
/// Every item is checked up front, whether or not it falls in the week. The
/// first one ending before it starts is reported as
/// [`CalendarError::InvalidRange`]; ranges are never swapped.
pub fn pack_week<'a, T: DatedItem>(
    items: &'a [T],
    week: &WeekWindow,
) -> Result<Vec<Layout<'a, T>>, CalendarError> {
    for (index, item) in items.iter().enumerate() {
        validate_range(index, item)?;
    }

    let mut segments: Vec<(&'a T, Segment)> = items
        .iter()
        .filter_map(|item| clip_to_week(item, week).map(|segment| (item, segment)))
        .collect();
    segments.sort_by(|(_, a), (_, b)| {
        a.start_day
            .cmp(&b.start_day)
            .then_with(|| (b.end_day - b.start_day).cmp(&(a.end_day - a.start_day)))
    });

    // Last occupied day per track.
    let mut track_ends: Vec<usize> = Vec::new();
    let mut layouts = Vec::with_capacity(segments.len());
    for (item, segment) in segments {
        let track = match track_ends
            .iter()
            .position(|&end_day| end_day < segment.start_day)
        {
            Some(track) => {
                track_ends[track] = segment.end_day;
                track
            }
            None => {
                track_ends.push(segment.end_day);
                track_ends.len() - 1
            }
        };
        layouts.push(Layout {
            item,
            track,
            start_day: segment.start_day,
            end_day: segment.end_day,
            duration: segment.duration(),
        });
    }
    Ok(layouts)
}

pub fn track_count<T>(layouts: &[Layout<'_, T>]) -> usize {
    layouts
        .iter()
        .map(|layout| layout.track + 1)
        .max()
        .unwrap_or(0)
}

/// Packs every week from `first` through `last`, each one on its own. An
/// item spanning several weeks may land on different tracks in each.
pub fn pack_weeks<'a, T: DatedItem>(
    items: &'a [T],
    first: WeekWindow,
    last: WeekWindow,
) -> Result<Vec<WeekLayout<'a, T>>, CalendarError> {
    let mut weeks = Vec::new();
    let mut week = first;
    while week <= last {
        let layouts = pack_week(items, &week)?;
        let track_count = track_count(&layouts);
        weeks.push(WeekLayout {
            week,
            layouts,
            track_count,
        });
        if week == last {
            break;
        }
        week = week.next()?;
    }
    Ok(weeks)
}
