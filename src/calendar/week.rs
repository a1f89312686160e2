use chrono::{Datelike, Days, NaiveDate};

use crate::error::CalendarError;

pub const DAYS_PER_WEEK: usize = 7;

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// A Sunday-to-Saturday span of seven calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl WeekWindow {
    /// The week holding `date`, starting on the Sunday on or before it.
    ///
    /// # Errors
    /// [`CalendarError::OutOfRange`] when that week runs past the dates
    /// chrono can represent.
    pub fn containing(date: NaiveDate) -> Result<Self, CalendarError> {
        let back = date.weekday().num_days_from_sunday() as u64;
        let start = date
            .checked_sub_days(Days::new(back))
            .ok_or(CalendarError::OutOfRange { date })?;
        Self::starting_at(start)
    }

    fn starting_at(start: NaiveDate) -> Result<Self, CalendarError> {
        let end = start
            .checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))
            .ok_or(CalendarError::OutOfRange { date: start })?;
        Ok(Self { start, end })
    }

    /// Builds a window from explicit bounds. `end` must be exactly six days
    /// after `start`; the start weekday is not checked.
    pub fn from_bounds(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if days_between(start, end) != (DAYS_PER_WEEK as i64 - 1) {
            return Err(CalendarError::InvalidWeek { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn next(&self) -> Result<Self, CalendarError> {
        let start = self
            .end
            .succ_opt()
            .ok_or(CalendarError::OutOfRange { date: self.end })?;
        Self::starting_at(start)
    }
}

/// First and last week that touch the given month, as shown by a month grid.
pub fn month_weeks(year: i32, month: u32) -> Result<(WeekWindow, WeekWindow), CalendarError> {
    let first_day =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { year, month })?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last_day = next_month
        .and_then(|d| d.pred_opt())
        .ok_or(CalendarError::InvalidMonth { year, month })?;
    Ok((
        WeekWindow::containing(first_day)?,
        WeekWindow::containing(last_day)?,
    ))
}
