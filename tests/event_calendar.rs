use chrono::NaiveDate;
use milongaBoard::calendar::WeekWindow;
use milongaBoard::config::Language;
use milongaBoard::error::EventStoreError;
use milongaBoard::models::event::{Event, EventKind, load_events};
use milongaBoard::service::event_service::{EventDirectory, EventFilter};
use milongaBoard::service::render::render_week;

const EVENTS_JSON: &str = r#"[
  {"id":"vals","title":"Vals intensive","kind":"workshop","venue":"Estudio DNI","region":"Almagro","start_date":"2023-01-05","end_date":"2023-01-10"},
  {"id":"weekend","title":"Weekend seminar","kind":"workshop","venue":"La Viruta","region":"Palermo","start_date":"2023-01-06","end_date":"2023-01-07"},
  {"id":"canning","title":"Milonga Parakultural","kind":"milonga","venue":"Salon Canning","region":"Palermo","start_date":"2023-01-06","end_date":"2023-01-06"},
  {"id":"basics","title":"Beginners class","kind":"class","venue":"Club Sunderland","region":"Villa Urquiza","start_date":"2023-01-02","end_date":"2023-01-02"}
]"#;

fn write_events(content: &str) -> String {
    let path = std::env::temp_dir().join(format!("milongaboard_test_{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, month, day).unwrap()
}

#[test]
fn loads_events_and_builds_week_view() {
    let path = write_events(EVENTS_JSON);
    let events = load_events(&path).expect("events should load");
    assert_eq!(events.len(), 4);

    let directory = EventDirectory::new(events).unwrap();
    let view = directory
        .week_view(&EventFilter::default(), WeekWindow::containing(date(1, 4)).unwrap())
        .unwrap();
    assert_eq!(view.week_start, date(1, 1));
    assert_eq!(view.week_end, date(1, 7));
    assert_eq!(view.layouts.len(), 4);
    assert_eq!(view.track_count, 3);

    let vals = view.layouts.iter().find(|l| l.event_id == "vals").unwrap();
    assert_eq!((vals.track, vals.start_day, vals.end_day), (0, 4, 6));
    let weekend = view.layouts.iter().find(|l| l.event_id == "weekend").unwrap();
    assert_eq!(weekend.track, 1);
    let canning = view.layouts.iter().find(|l| l.event_id == "canning").unwrap();
    assert_eq!(canning.track, 2);
    let basics = view.layouts.iter().find(|l| l.event_id == "basics").unwrap();
    assert_eq!(basics.track, 0);
    std::fs::remove_file(&path).ok();
}

#[test]
fn week_view_respects_region_and_kind_filters() {
    let path = write_events(EVENTS_JSON);
    let directory = EventDirectory::new(load_events(&path).unwrap()).unwrap();
    let filter = EventFilter {
        region: Some("palermo".to_string()),
        kinds: vec![EventKind::Workshop],
        ..Default::default()
    };
    let view = directory
        .week_view(&filter, WeekWindow::containing(date(1, 6)).unwrap())
        .unwrap();
    let ids: Vec<&str> = view.layouts.iter().map(|l| l.event_id.as_str()).collect();
    assert_eq!(ids, vec!["weekend"]);
    assert_eq!(view.track_count, 1);
    std::fs::remove_file(&path).ok();
}

#[test]
fn month_view_repacks_each_week() {
    let path = write_events(EVENTS_JSON);
    let directory = EventDirectory::new(load_events(&path).unwrap()).unwrap();
    let weeks = directory
        .month_view(&EventFilter::default(), 2023, 1)
        .unwrap();
    assert_eq!(weeks.len(), 5);
    assert_eq!(weeks[0].week_start, date(1, 1));

    let second = &weeks[1];
    assert_eq!(second.week_start, date(1, 8));
    let vals = second.layouts.iter().find(|l| l.event_id == "vals").unwrap();
    assert_eq!((vals.track, vals.start_day, vals.end_day), (0, 0, 2));
    assert_eq!(second.track_count, 1);
    assert!(weeks[2..].iter().all(|w| w.layouts.is_empty()));
    std::fs::remove_file(&path).ok();
}

#[test]
fn rendered_week_rolls_extra_tracks_into_more_row() {
    let path = write_events(EVENTS_JSON);
    let directory = EventDirectory::new(load_events(&path).unwrap()).unwrap();
    let view = directory
        .week_view(&EventFilter::default(), WeekWindow::containing(date(1, 1)).unwrap())
        .unwrap();
    let text = render_week(&view, Language::En, 2);
    assert!(text.contains("[Vals intensive"));
    assert!(text.contains("+1 more"));
    assert!(!text.contains("Milonga Parakultural"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn backwards_event_is_rejected_at_load() {
    let path = write_events(
        r#"[{"id":"oops","title":"Typo","kind":"class","venue":"X","region":"Y","start_date":"2023-01-09","end_date":"2023-01-02"}]"#,
    );
    let err = load_events(&path).unwrap_err();
    assert!(matches!(err, EventStoreError::Invalid { ref id, .. } if id == "oops"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn directory_rejects_backwards_event_by_id_and_position() {
    let mut events: Vec<Event> = serde_json::from_str(EVENTS_JSON).unwrap();
    let mut typo = events[0].clone();
    typo.id = "typo".to_string();
    typo.region = "Boedo".to_string();
    typo.start_date = date(1, 5);
    typo.end_date = date(1, 3);
    events.push(typo);

    let err = EventDirectory::new(events).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid event `typo`: item 4 ends on 2023-01-03 before it starts on 2023-01-05"
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_events("/nonexistent/milongaboard/events.json").unwrap_err();
    assert!(matches!(err, EventStoreError::Io { .. }));
}
