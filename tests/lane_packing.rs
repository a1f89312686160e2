use chrono::{Days, NaiveDate};
use milongaBoard::calendar::{DatedItem, Layout, WeekWindow, clip_to_week, pack_week, track_count};
use milongaBoard::error::CalendarError;

#[derive(Debug, PartialEq, Eq)]
struct Item {
    name: &'static str,
    start: NaiveDate,
    end: NaiveDate,
}

impl DatedItem for Item {
    fn start_date(&self) -> NaiveDate {
        self.start
    }

    fn end_date(&self) -> NaiveDate {
        self.end
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn item(name: &'static str, start: NaiveDate, end: NaiveDate) -> Item {
    Item { name, start, end }
}

fn first_week_2023() -> WeekWindow {
    WeekWindow::from_bounds(date(2023, 1, 1), date(2023, 1, 7)).unwrap()
}

fn find<'a>(layouts: &'a [Layout<'a, Item>], name: &str) -> &'a Layout<'a, Item> {
    layouts.iter().find(|l| l.item.name == name).unwrap()
}

#[test]
fn packs_documented_example_week() {
    let items = vec![
        item("A", date(2023, 1, 1), date(2023, 1, 3)),
        item("B", date(2023, 1, 2), date(2023, 1, 2)),
        item("C", date(2023, 1, 4), date(2023, 1, 7)),
    ];
    let layouts = pack_week(&items, &first_week_2023()).unwrap();

    let a = find(&layouts, "A");
    assert_eq!((a.track, a.start_day, a.end_day, a.duration), (0, 0, 2, 3));
    let b = find(&layouts, "B");
    assert_eq!((b.track, b.start_day, b.end_day, b.duration), (1, 1, 1, 1));
    let c = find(&layouts, "C");
    assert_eq!((c.track, c.start_day, c.end_day, c.duration), (0, 3, 6, 4));
    assert_eq!(track_count(&layouts), 2);
}

#[test]
fn identical_full_week_items_get_distinct_tracks_in_input_order() {
    let items = vec![
        item("first", date(2023, 1, 1), date(2023, 1, 7)),
        item("second", date(2023, 1, 1), date(2023, 1, 7)),
        item("third", date(2023, 1, 1), date(2023, 1, 7)),
    ];
    let layouts = pack_week(&items, &first_week_2023()).unwrap();
    let order: Vec<(&str, usize)> = layouts.iter().map(|l| (l.item.name, l.track)).collect();
    assert_eq!(order, vec![("first", 0), ("second", 1), ("third", 2)]);
    assert!(layouts.iter().all(|l| l.start_day == 0 && l.end_day == 6 && l.duration == 7));
}

#[test]
fn clips_item_starting_in_previous_year() {
    let items = vec![item("festival", date(2022, 12, 28), date(2023, 1, 3))];
    let layouts = pack_week(&items, &first_week_2023()).unwrap();
    assert_eq!(layouts.len(), 1);
    assert_eq!((layouts[0].start_day, layouts[0].end_day), (0, 2));
    assert_eq!(layouts[0].duration, 3);
}

#[test]
fn empty_input_has_no_tracks() {
    let items: Vec<Item> = Vec::new();
    let layouts = pack_week(&items, &first_week_2023()).unwrap();
    assert!(layouts.is_empty());
    assert_eq!(track_count(&layouts), 0);
}

#[test]
fn items_outside_week_are_dropped() {
    let items = vec![
        item("before", date(2022, 12, 20), date(2022, 12, 31)),
        item("inside", date(2023, 1, 5), date(2023, 1, 5)),
        item("after", date(2023, 1, 8), date(2023, 1, 12)),
    ];
    let layouts = pack_week(&items, &first_week_2023()).unwrap();
    let names: Vec<&str> = layouts.iter().map(|l| l.item.name).collect();
    assert_eq!(names, vec!["inside"]);
}

#[test]
fn non_overlapping_items_all_share_track_zero() {
    let items = vec![
        item("sun", date(2023, 1, 1), date(2023, 1, 1)),
        item("mon-tue", date(2023, 1, 2), date(2023, 1, 3)),
        item("thu", date(2023, 1, 5), date(2023, 1, 5)),
        item("sat", date(2023, 1, 7), date(2023, 1, 7)),
    ];
    let layouts = pack_week(&items, &first_week_2023()).unwrap();
    assert!(layouts.iter().all(|l| l.track == 0));
}

#[test]
fn backwards_range_is_rejected_not_swapped() {
    let items = vec![
        item("ok", date(2023, 1, 1), date(2023, 1, 2)),
        item("bad", date(2023, 1, 5), date(2023, 1, 3)),
    ];
    let err = pack_week(&items, &first_week_2023()).unwrap_err();
    assert_eq!(
        err,
        CalendarError::InvalidRange {
            index: 1,
            start: date(2023, 1, 5),
            end: date(2023, 1, 3),
        }
    );
}

#[test]
fn multi_week_item_is_packed_per_week() {
    // The long workshop sits under an earlier bar in week one but alone in week two.
    let items = vec![
        item("weekend", date(2023, 1, 5), date(2023, 1, 7)),
        item("intensive", date(2023, 1, 6), date(2023, 1, 10)),
    ];
    let week_one = first_week_2023();
    let week_two = week_one.next().unwrap();

    let first = pack_week(&items, &week_one).unwrap();
    assert_eq!(find(&first, "intensive").track, 1);

    let second = pack_week(&items, &week_two).unwrap();
    let intensive = find(&second, "intensive");
    assert_eq!(intensive.track, 0);
    assert_eq!((intensive.start_day, intensive.end_day), (0, 2));
}

// Deterministic pseudo-random ranges in and around the first week of 2023.
fn generated_items(seed: u64, count: usize) -> Vec<Item> {
    let base = date(2022, 12, 29);
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state >> 33
    };
    (0..count)
        .map(|_| {
            let start = base + Days::new(next() % 14);
            let end = start + Days::new(next() % 5);
            item("generated", start, end)
        })
        .collect()
}

fn max_overlap(items: &[Item], week: &WeekWindow) -> usize {
    let segments: Vec<_> = items.iter().filter_map(|i| clip_to_week(i, week)).collect();
    (0..7)
        .map(|day| {
            segments
                .iter()
                .filter(|s| s.start_day <= day && day <= s.end_day)
                .count()
        })
        .max()
        .unwrap_or(0)
}

#[test]
fn generated_inputs_hold_packing_properties() {
    let week = first_week_2023();
    for seed in 1..200u64 {
        let items = generated_items(seed, (seed % 12) as usize);
        let layouts = pack_week(&items, &week).unwrap();

        for (i, a) in layouts.iter().enumerate() {
            for b in layouts.iter().skip(i + 1) {
                if a.track == b.track {
                    assert!(
                        !a.segment().overlaps(&b.segment()),
                        "seed {} overlapping bars on track {}",
                        seed,
                        a.track
                    );
                }
            }
        }

        let expected_in_week = items.iter().filter(|i| clip_to_week(*i, &week).is_some()).count();
        assert_eq!(layouts.len(), expected_in_week);
        assert!(layouts.iter().all(|l| l.item.start <= week.end() && l.item.end >= week.start()));

        assert_eq!(track_count(&layouts), max_overlap(&items, &week), "seed {}", seed);

        let again = pack_week(&items, &week).unwrap();
        assert_eq!(layouts, again);
    }
}
