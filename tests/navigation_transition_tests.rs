use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use organizer_rs::core::{TimeBlock, TimeUnit, Timeline, Viewport};
use organizer_rs::navigation::{NavigationConfig, NavigationState};

fn timelines() -> Vec<Timeline> {
    vec![
        Timeline::new(0, TimeUnit::Day),
        Timeline::new(1, TimeUnit::Week),
        Timeline::new(2, TimeUnit::Month),
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn week_state(focus: NaiveDate) -> NavigationState {
    let mut state = NavigationState::new(
        &timelines(),
        NavigationConfig::default(),
        Some(Timeline::new(1, TimeUnit::Week)),
        focus,
    )
    .expect("valid state");
    state
        .update_viewport(Viewport::new(1000, 1000))
        .expect("valid viewport");
    state
}

#[test]
fn settled_axes_collapse_the_transition() {
    let state = week_state(date(2024, 3, 15));
    let transition = state.transition();
    assert_eq!(transition.from, transition.to);
    assert_eq!(transition.from, state.current_navigation_position());
}

#[test]
fn adjacent_positions_hold_the_other_axis_fixed() {
    let state = week_state(date(2024, 3, 15));
    let adjacent = state.adjacent_navigation_positions();

    assert_eq!(adjacent.current.time_block.start(), date(2024, 3, 11));
    // Date neighbors keep the granularity position.
    assert_eq!(adjacent.prev_date.time_block.start(), date(2024, 3, 4));
    assert_eq!(adjacent.next_date.time_block.start(), date(2024, 3, 18));
    assert_eq!(
        adjacent.prev_date.timeline_nav_pos,
        adjacent.current.timeline_nav_pos
    );
    // Timeline neighbors keep the focused date.
    assert_eq!(adjacent.prev_timeline.date, date(2024, 3, 15));
    assert_eq!(adjacent.next_timeline.date, date(2024, 3, 15));
    assert!(adjacent.prev_timeline.timeline_nav_pos.shows_child());
    assert!(adjacent.next_timeline.timeline_nav_pos.shows_child());
}

#[test]
fn date_drag_selects_the_next_date_pair() {
    let mut state = week_state(date(2024, 3, 15));
    state.drag_date(500.0);

    let transition = state.transition();
    assert_eq!(transition.from, state.adjacent_navigation_positions().current);
    assert_eq!(transition.to.time_block.start(), date(2024, 3, 18));
    assert_abs_diff_eq!(transition.progress, 0.5, epsilon = 1e-9);
}

#[test]
fn negative_date_drag_selects_the_previous_date_pair() {
    let mut state = week_state(date(2024, 3, 15));
    state.drag_date(-250.0);

    let transition = state.transition();
    assert_eq!(transition.from.time_block.start(), date(2024, 3, 4));
    assert_eq!(transition.to, state.adjacent_navigation_positions().current);
    // Offset sits 250 px short of current; progress runs prev -> current.
    assert_abs_diff_eq!(transition.progress, 0.75, epsilon = 1e-9);
}

#[test]
fn granularity_offset_takes_precedence_over_date_offset() {
    let mut state = week_state(date(2024, 3, 15));
    state.drag_date(300.0);
    state.drag_timeline(350.0);

    let transition = state.transition();
    assert_eq!(
        transition.to.timeline_nav_pos,
        state.adjacent_navigation_positions().next_timeline.timeline_nav_pos
    );
    // Week plain (1000) -> Month-with-weeks (1700) is 700 px of travel.
    assert_abs_diff_eq!(transition.progress, 0.5, epsilon = 1e-9);
}

#[test]
fn visible_range_interpolates_between_endpoint_ranges() {
    let mut state = week_state(date(2024, 3, 15));
    state.drag_date(500.0);

    let transition = state.transition();
    let expected = transition
        .from
        .date_range
        .to_fractional()
        .lerp(transition.to.date_range.to_fractional(), 0.5);
    let actual = state.visible_date_time_range();
    assert_abs_diff_eq!(actual.start, expected.start, epsilon = 1e-9);
    assert_abs_diff_eq!(actual.end, expected.end, epsilon = 1e-9);
    // Halfway between W11 and W12, 3.5 days past the W11 start.
    assert_abs_diff_eq!(
        actual.start - transition.from.date_range.to_fractional().start,
        3.5,
        epsilon = 1e-9
    );
}

#[test]
fn full_date_drag_and_settle_moves_to_the_next_block() {
    let mut state = week_state(date(2024, 3, 15));
    state.drag_date(1000.0);
    let settled = state.settle_date(0.0);

    assert_eq!(settled, date(2024, 3, 18));
    assert_eq!(state.focused_date(), date(2024, 3, 18));
    assert_eq!(state.current_time_block().start(), date(2024, 3, 18));

    // Anchors were rebuilt around the new focus without a visual jump.
    assert!(state.date_axis().is_settled());
    assert_abs_diff_eq!(state.date_axis().offset(), 0.0, epsilon = 1e-9);
    let transition = state.transition();
    assert_eq!(transition.from, transition.to);
}

#[test]
fn timeline_settle_reveals_child_and_updates_date_anchors() {
    let mut state = week_state(date(2024, 3, 15));
    // Week plain (1000) -> Month-with-weeks (1700).
    state.drag_timeline(700.0);
    let settled = state.settle_timeline(0.0);

    assert_eq!(settled.timeline.unit, TimeUnit::Month);
    assert!(settled.shows_child());
    // Date anchors now span month blocks with week-aligned visible ranges.
    assert!(state.date_axis().position_of(&date(2024, 2, 1)).is_some());
    assert!(state.date_axis().position_of(&date(2024, 4, 1)).is_some());
}

#[test]
fn earliest_date_collapses_the_previous_neighbor() {
    let mut state = NavigationState::new(
        &timelines(),
        NavigationConfig::default(),
        Some(Timeline::new(0, TimeUnit::Day)),
        NaiveDate::MIN,
    )
    .expect("valid state");
    state
        .update_viewport(Viewport::new(1000, 1000))
        .expect("valid viewport");

    let adjacent = state.adjacent_navigation_positions();
    assert_eq!(adjacent.prev_date, adjacent.current);
    assert_ne!(adjacent.next_date, adjacent.current);
}

#[test]
fn finest_timeline_collapses_the_previous_granularity_neighbor() {
    let mut state = NavigationState::new(
        &timelines(),
        NavigationConfig::default(),
        Some(Timeline::new(0, TimeUnit::Day)),
        date(2024, 3, 15),
    )
    .expect("valid state");
    state
        .update_viewport(Viewport::new(1000, 1000))
        .expect("valid viewport");

    let adjacent = state.adjacent_navigation_positions();
    assert_eq!(adjacent.prev_timeline, adjacent.current);
    assert!(adjacent.next_timeline.timeline_nav_pos.shows_child());
}

#[test]
fn coarsest_timeline_collapses_the_next_granularity_neighbor() {
    let mut state = NavigationState::new(
        &timelines(),
        NavigationConfig::default(),
        Some(Timeline::new(2, TimeUnit::Month)),
        date(2024, 3, 15),
    )
    .expect("valid state");
    state
        .update_viewport(Viewport::new(1000, 1000))
        .expect("valid viewport");

    let adjacent = state.adjacent_navigation_positions();
    assert_eq!(adjacent.next_timeline, adjacent.current);
}
