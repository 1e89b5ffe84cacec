use chrono::NaiveDate;
use organizer_rs::core::{TimeBlock, TimeUnit, Timeline, TimelineNavPosition};

fn timelines() -> Vec<Timeline> {
    vec![
        Timeline::new(0, TimeUnit::Day),
        Timeline::new(1, TimeUnit::Week),
        Timeline::new(2, TimeUnit::Month),
    ]
}

#[test]
fn timelines_sort_finest_first() {
    let mut unsorted = vec![
        Timeline::new(2, TimeUnit::Month),
        Timeline::new(0, TimeUnit::Day),
        Timeline::new(1, TimeUnit::Week),
    ];
    unsorted.sort();
    assert_eq!(unsorted, timelines());
}

#[test]
fn equal_granularity_timelines_are_disambiguated_by_id() {
    let a = Timeline::new(3, TimeUnit::Week);
    let b = Timeline::new(7, TimeUnit::Week);
    assert!(a < b);
    assert_ne!(a, b);
}

#[test]
fn time_block_from_delegates_to_unit() {
    let week_timeline = Timeline::new(1, TimeUnit::Week);
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date");
    let block = week_timeline.time_block_from(date);
    assert_eq!(block.unit(), TimeUnit::Week);
    assert!(block.date_range().contains(date));
}

#[test]
fn sequence_has_two_n_minus_one_positions() {
    let positions = TimelineNavPosition::sequence(&timelines());
    assert_eq!(positions.len(), 5);
}

#[test]
fn sequence_interleaves_child_visible_before_plain() {
    let [day, week, month] = [
        Timeline::new(0, TimeUnit::Day),
        Timeline::new(1, TimeUnit::Week),
        Timeline::new(2, TimeUnit::Month),
    ];
    let positions = TimelineNavPosition::sequence(&timelines());

    assert_eq!(positions[0], TimelineNavPosition::plain(day));
    assert_eq!(positions[1], TimelineNavPosition::with_child(week, day));
    assert_eq!(positions[2], TimelineNavPosition::plain(week));
    assert_eq!(positions[3], TimelineNavPosition::with_child(month, week));
    assert_eq!(positions[4], TimelineNavPosition::plain(month));
}

#[test]
fn sequence_is_monotone_in_granularity() {
    let positions = TimelineNavPosition::sequence(&timelines());
    for pair in positions.windows(2) {
        assert!(
            pair[0].timeline <= pair[1].timeline,
            "base timeline granularity must never decrease along the axis"
        );
    }
}

#[test]
fn sequence_accepts_unsorted_input() {
    let shuffled = vec![
        Timeline::new(1, TimeUnit::Week),
        Timeline::new(2, TimeUnit::Month),
        Timeline::new(0, TimeUnit::Day),
    ];
    assert_eq!(
        TimelineNavPosition::sequence(&shuffled),
        TimelineNavPosition::sequence(&timelines())
    );
}

#[test]
fn visible_timelines_list_child_first() {
    let week = Timeline::new(1, TimeUnit::Week);
    let day = Timeline::new(0, TimeUnit::Day);

    let plain = TimelineNavPosition::plain(week);
    assert_eq!(plain.visible_timelines().as_slice(), &[week]);
    assert_eq!(plain.visible_child(), None);

    let with_child = TimelineNavPosition::with_child(week, day);
    assert_eq!(with_child.visible_timelines().as_slice(), &[day, week]);
    assert_eq!(with_child.visible_child(), Some(day));
    assert!(with_child.shows_child());
}

#[test]
fn single_timeline_sequence_is_just_the_plain_position() {
    let solo = [Timeline::new(0, TimeUnit::Week)];
    let positions = TimelineNavPosition::sequence(&solo);
    assert_eq!(positions, vec![TimelineNavPosition::plain(solo[0])]);
}
