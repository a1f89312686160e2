use super::lanes::Layout;
use super::week::DAYS_PER_WEEK;
use crate::config::Language;

/// Something already placed on a week grid.
pub trait Placement {
    fn track(&self) -> usize;
    fn start_day(&self) -> usize;
    fn end_day(&self) -> usize;

    fn covers_day(&self, day: usize) -> bool {
        day >= self.start_day() && day <= self.end_day()
    }
}

impl<T> Placement for Layout<'_, T> {
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

/// Bars that fit under the track limit and per-day counts of the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleWeek<'l, P> {
    pub bars: Vec<&'l P>,
    pub hidden_per_day: [usize; DAYS_PER_WEEK],
}

impl<P> VisibleWeek<'_, P> {
    pub fn has_hidden(&self) -> bool {
        self.hidden_per_day.iter().any(|&count| count > 0)
    }
}

pub fn split_visible<P: Placement>(placements: &[P], max_tracks: usize) -> VisibleWeek<'_, P> {
    let mut bars = Vec::new();
    let mut hidden_per_day = [0; DAYS_PER_WEEK];
    for placement in placements {
        if placement.track() < max_tracks {
            bars.push(placement);
            continue;
        }
        for (day, hidden) in hidden_per_day.iter_mut().enumerate() {
            if placement.covers_day(day) {
                *hidden += 1;
            }
        }
    }
    VisibleWeek {
        bars,
        hidden_per_day,
    }
}

pub fn more_label(hidden: usize, language: Language) -> Option<String> {
    if hidden == 0 {
        return None;
    }
    Some(match language {
        Language::En => format!("+{} more", hidden),
        Language::Es => format!("+{} más", hidden),
    })
}
