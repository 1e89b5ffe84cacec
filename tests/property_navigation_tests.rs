use chrono::NaiveDate;
use organizer_rs::core::{TimeBlock, TimeUnit, Timeline, TimelineNavPosition, Viewport};
use organizer_rs::interaction::SnapConfig;
use organizer_rs::navigation::{NavigationConfig, NavigationState, visible_date_range};
use proptest::prelude::*;

fn timelines() -> Vec<Timeline> {
    vec![
        Timeline::new(0, TimeUnit::Day),
        Timeline::new(1, TimeUnit::Week),
        Timeline::new(2, TimeUnit::Month),
    ]
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1970i32..=2100, 1u32..=12, 1u32..=28)
        .prop_filter_map("valid calendar date", |(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d)
        })
}

proptest! {
    #[test]
    fn granularity_anchors_increase_for_any_child_size_ratio(
        ratio in 0.01f64..0.99,
        width in 100u32..4000,
        focus in arb_date()
    ) {
        let config = NavigationConfig {
            child_timeline_size_ratio: ratio,
            ..NavigationConfig::default()
        };
        let mut state =
            NavigationState::new(&timelines(), config, None, focus).expect("valid state");
        state
            .update_viewport(Viewport::new(width, 600))
            .expect("valid viewport");

        let offsets: Vec<f64> = state
            .nav_positions()
            .iter()
            .map(|pos| state.timeline_axis().position_of(pos).expect("anchored"))
            .collect();
        prop_assert_eq!(offsets.len(), 5);
        prop_assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn visible_range_always_contains_the_block_range(
        focus in arb_date(),
        position_index in 0usize..5
    ) {
        let positions = TimelineNavPosition::sequence(&timelines());
        let position = positions[position_index];
        let block = position.timeline.time_block_from(focus);
        let range = visible_date_range(position, block);
        prop_assert!(range.start() <= block.start());
        prop_assert!(range.end_inclusive() >= block.end_inclusive());
    }

    #[test]
    fn date_neighbors_are_anchored_on_opposite_sides(
        focus in arb_date(),
        position_index in 0usize..5
    ) {
        let positions = TimelineNavPosition::sequence(&timelines());
        let timeline = positions[position_index].timeline;
        let mut state = NavigationState::new(
            &timelines(),
            NavigationConfig::default(),
            Some(timeline),
            focus,
        )
        .expect("valid state");
        state
            .update_viewport(Viewport::new(1000, 800))
            .expect("valid viewport");

        let block = state.current_time_block();
        let axis = state.date_axis();
        let prev = axis
            .position_of(&block.previous().expect("not at calendar edge").start())
            .expect("prev anchor");
        let next = axis
            .position_of(&block.next().expect("not at calendar edge").start())
            .expect("next anchor");
        prop_assert!(prev < 0.0);
        prop_assert!(next > 0.0);
        prop_assert!(axis.position_of(&focus) == Some(0.0));
    }

    #[test]
    fn settling_twice_is_idempotent(
        focus in arb_date(),
        drag in -1500.0f64..1500.0
    ) {
        let mut state = NavigationState::new(
            &timelines(),
            NavigationConfig {
                snap: SnapConfig::default(),
                ..NavigationConfig::default()
            },
            Some(Timeline::new(1, TimeUnit::Week)),
            focus,
        )
        .expect("valid state");
        state
            .update_viewport(Viewport::new(1000, 1000))
            .expect("valid viewport");

        state.drag_date(drag);
        let first = state.settle_date(0.0);
        let second = state.settle_date(0.0);
        prop_assert_eq!(first, second);
        prop_assert!(state.date_axis().is_settled());
    }

    #[test]
    fn transition_progress_stays_in_unit_interval(
        focus in arb_date(),
        timeline_drag in -2500.0f64..2500.0,
        date_drag in -1200.0f64..1200.0
    ) {
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

        state.drag_timeline(timeline_drag);
        state.drag_date(date_drag);
        let transition = state.transition();
        prop_assert!((0.0..=1.0).contains(&transition.progress));

        let visible = state.visible_date_time_range();
        prop_assert!(visible.start < visible.end);
    }
}
