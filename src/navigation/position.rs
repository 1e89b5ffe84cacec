use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::date_range::DateRange;
use crate::core::time_unit::{TimeBlock, TimeUnitInstance};
use crate::core::timeline::TimelineNavPosition;

/// A fully resolved navigation position: a granularity-axis position plus a
/// focused date, with the derived focused block and visible date range.
///
/// Positions are recomputed on every derivation pass; they carry no identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationPosition {
    pub timeline_nav_pos: TimelineNavPosition,
    pub date: NaiveDate,
    pub date_range: DateRange,
    pub time_block: TimeUnitInstance,
}

impl NavigationPosition {
    /// Resolves the position for a granularity-axis position and focused date.
    #[must_use]
    pub fn derive(timeline_nav_pos: TimelineNavPosition, date: NaiveDate) -> Self {
        let time_block = timeline_nav_pos.timeline.time_block_from(date);
        Self {
            timeline_nav_pos,
            date,
            date_range: visible_date_range(timeline_nav_pos, time_block),
            time_block,
        }
    }
}

/// Visible date range of `time_block` at the given granularity position.
///
/// With a child timeline visible, the range extends outward to the bounds of
/// the child blocks containing the block's first and last day, so e.g. a
/// month shown with weeks snaps to whole weeks at its boundary.
#[must_use]
pub fn visible_date_range(
    timeline_nav_pos: TimelineNavPosition,
    time_block: TimeUnitInstance,
) -> DateRange {
    match timeline_nav_pos.visible_child() {
        Some(child) => {
            let first = child.time_block_from(time_block.start());
            let last = child.time_block_from(time_block.end_inclusive());
            DateRange::new(first.start(), last.end_inclusive())
        }
        None => time_block.date_range(),
    }
}

/// The current position and the four positions reachable from it in one step
/// along either axis. At an axis boundary the neighbor equals `current`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacentNavigationPositions {
    pub current: NavigationPosition,
    pub prev_date: NavigationPosition,
    pub next_date: NavigationPosition,
    pub prev_timeline: NavigationPosition,
    pub next_timeline: NavigationPosition,
}

impl AdjacentNavigationPositions {
    pub fn iter(&self) -> impl Iterator<Item = &NavigationPosition> {
        [
            &self.current,
            &self.prev_date,
            &self.next_date,
            &self.prev_timeline,
            &self.next_timeline,
        ]
        .into_iter()
    }
}

/// The two interpolation endpoints of the in-flight transition and the
/// progress between them. Both endpoints equal the current position when
/// both axes are settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationTransition {
    pub from: NavigationPosition,
    pub to: NavigationPosition,
    /// Progress from `from` toward `to` in `[0, 1]`, queried from whichever
    /// axis is driving the transition.
    pub progress: f64,
}

/// Presentation role of a configured timeline relative to the current
/// granularity position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelinePresentation {
    /// The focused timeline, occupying the whole viewport.
    Fullscreen,
    /// The focused timeline, sharing the viewport with its child strip.
    Parent,
    /// The visible child of the focused timeline.
    Child,
    /// Finer than what is shown and not the visible child.
    HiddenChild,
    /// Coarser than what is shown.
    HiddenParent,
}
