//! Week-grid layout for multi-day events.
//!
//! Items are clipped to a Sunday-to-Saturday window and packed greedily into
//! horizontal tracks so that no two bars on one track share a day. Packing is
//! pure and recomputed per week.

pub mod lanes;
pub mod overflow;
pub mod week;

pub use lanes::{
    DatedItem, Layout, Segment, WeekLayout, clip_to_week, pack_week, pack_weeks, track_count,
};
pub use overflow::{Placement, VisibleWeek, more_label, split_visible};
pub use week::{WeekWindow, days_between, month_weeks};
