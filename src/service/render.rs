use chrono::Days;

use crate::calendar::{more_label, split_visible};
use crate::config::Language;
use crate::service::event_service::{LayoutView, WeekView};

const COLUMN_WIDTH: usize = 12;

/// Plain-text week grid: one line per visible track, then the "+K more" row.
pub fn render_week(view: &WeekView, language: Language, max_tracks: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} .. {}\n", view.week_start, view.week_end));

    let labels = language.weekday_labels();
    for (offset, label) in labels.iter().enumerate() {
        let day = view
            .week_start
            .checked_add_days(Days::new(offset as u64))
            .map(|d| d.format("%d").to_string())
            .unwrap_or_default();
        out.push_str(&format!("{:<width$}", format!("{} {}", label, day), width = COLUMN_WIDTH));
    }
    out.push('\n');

    let visible = split_visible(&view.layouts, max_tracks);
    let track_lines = view.track_count.min(max_tracks);
    for track in 0..track_lines {
        let mut bars: Vec<&LayoutView> = visible
            .bars
            .iter()
            .copied()
            .filter(|bar| bar.track == track)
            .collect();
        bars.sort_by_key(|bar| bar.start_day);
        out.push_str(&render_track(&bars));
        out.push('\n');
    }

    if visible.has_hidden() {
        for hidden in visible.hidden_per_day {
            let cell = more_label(hidden, language).unwrap_or_default();
            out.push_str(&format!("{:<width$}", cell, width = COLUMN_WIDTH));
        }
        out.push('\n');
    }
    out
}

fn render_track(bars: &[&LayoutView]) -> String {
    let mut line = String::new();
    let mut column = 0;
    for bar in bars {
        let start = bar.start_day * COLUMN_WIDTH;
        line.push_str(&" ".repeat(start.saturating_sub(column)));
        let inner = bar.duration * COLUMN_WIDTH - 3;
        let title: String = bar.title.chars().take(inner).collect();
        line.push_str(&format!("[{:=<inner$}] ", title, inner = inner));
        column = start + bar.duration * COLUMN_WIDTH;
    }
    line.trim_end().to_string()
}
