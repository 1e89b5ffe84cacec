use chrono::NaiveDate;
use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::date_range::{DateRange, FractionalDayRange};
use crate::core::time_unit::{TimeBlock, TimeUnitInstance};
use crate::core::timeline::{Timeline, TimelineNavPosition};
use crate::core::types::Viewport;
use crate::error::{OrganizerError, OrganizerResult};
use crate::interaction::{Anchor, AnchoredDraggable};

use super::config::NavigationConfig;
use super::position::{
    AdjacentNavigationPositions, NavigationPosition, NavigationTransition, TimelinePresentation,
    visible_date_range,
};

const OFFSET_EPSILON: f64 = 1e-6;

/// The navigation engine: two coupled drag axes resolved into one consistent
/// navigation position.
///
/// The granularity axis ranges over the fixed [`TimelineNavPosition`]
/// sequence; the date axis ranges over exactly three live anchors (previous
/// block start, the literal focused date at offset zero, next block start).
/// Anchor offsets are recomputed from viewport geometry; everything else is
/// derived on demand as a pure function of the two axes.
///
/// All recomputation is synchronous: mutating entry points re-sync the date
/// anchors whenever the (granularity position, focused date) pair changed,
/// so callers drive the engine from a single UI-affine context without any
/// background machinery.
#[derive(Debug)]
pub struct NavigationState {
    timelines: Vec<Timeline>,
    nav_positions: Vec<TimelineNavPosition>,
    config: NavigationConfig,
    timeline_axis: AnchoredDraggable<TimelineNavPosition>,
    date_axis: AnchoredDraggable<NaiveDate>,
    viewport: Option<Viewport>,
    /// The (position, date) pair the current date anchors were computed for.
    date_anchor_key: Option<(TimelineNavPosition, NaiveDate)>,
}

impl NavigationState {
    /// Creates an engine over the given timelines, focused at `initial_date`
    /// on `initial_timeline` (or the finest timeline when `None`).
    ///
    /// Anchors stay empty until the first [`NavigationState::update_viewport`].
    pub fn new(
        timelines: &[Timeline],
        config: NavigationConfig,
        initial_timeline: Option<Timeline>,
        initial_date: NaiveDate,
    ) -> OrganizerResult<Self> {
        let config = config.validate()?;
        if timelines.is_empty() {
            return Err(OrganizerError::InvalidConfig(
                "at least one timeline is required".to_owned(),
            ));
        }

        let mut sorted = timelines.to_vec();
        sorted.sort();
        let nav_positions = TimelineNavPosition::sequence(&sorted);

        let initial_pos = initial_timeline
            .and_then(|timeline| {
                nav_positions
                    .iter()
                    .copied()
                    .find(|pos| pos.timeline == timeline && !pos.shows_child())
            })
            .or_else(|| nav_positions.first().copied())
            .ok_or_else(|| {
                OrganizerError::InvalidConfig("empty navigation position sequence".to_owned())
            })?;

        Ok(Self {
            timelines: sorted,
            nav_positions,
            config,
            timeline_axis: AnchoredDraggable::new(initial_pos, config.snap),
            date_axis: AnchoredDraggable::new(initial_date, config.snap),
            viewport: None,
            date_anchor_key: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> NavigationConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The fixed granularity-axis anchor sequence.
    #[must_use]
    pub fn nav_positions(&self) -> &[TimelineNavPosition] {
        &self.nav_positions
    }

    #[must_use]
    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    #[must_use]
    pub fn timeline_axis(&self) -> &AnchoredDraggable<TimelineNavPosition> {
        &self.timeline_axis
    }

    #[must_use]
    pub fn date_axis(&self) -> &AnchoredDraggable<NaiveDate> {
        &self.date_axis
    }

    #[must_use]
    pub fn focused_date(&self) -> NaiveDate {
        *self.date_axis.current_value()
    }

    #[must_use]
    pub fn current_timeline_nav_pos(&self) -> TimelineNavPosition {
        *self.timeline_axis.current_value()
    }

    /// The currently focused block, for header and label text.
    #[must_use]
    pub fn current_time_block(&self) -> TimeUnitInstance {
        self.current_navigation_position().time_block
    }

    #[must_use]
    pub fn current_navigation_position(&self) -> NavigationPosition {
        NavigationPosition::derive(self.current_timeline_nav_pos(), self.focused_date())
    }

    /// Re-derives anchor spacing for the new viewport size.
    ///
    /// The current logical position is preserved on both axes, so a resize
    /// or rotation never causes a visual jump.
    pub fn update_viewport(&mut self, viewport: Viewport) -> OrganizerResult<()> {
        if !viewport.is_valid() {
            return Err(OrganizerError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        if self.viewport.map(|v| v.width) != Some(viewport.width) {
            self.update_timeline_anchors(viewport.width);
        }
        if self.viewport.map(|v| v.height) != Some(viewport.height) {
            self.update_date_anchors(viewport.height);
        }
        self.viewport = Some(viewport);
        Ok(())
    }

    /// Sets the extra visible space before/after the current date range, as
    /// fractions of the range size. Affects only the active-block derivation.
    pub fn set_visibility_margins(&mut self, top: f64, bottom: f64) -> OrganizerResult<()> {
        let mut candidate = self.config;
        candidate.relative_top_margin = top;
        candidate.relative_bottom_margin = bottom;
        self.config = candidate.validate()?;
        Ok(())
    }

    /// Applies a raw drag delta along the granularity axis.
    pub fn drag_timeline(&mut self, delta: f64) {
        self.timeline_axis.dispatch_raw_delta(delta);
    }

    /// Applies a raw drag delta along the date axis.
    pub fn drag_date(&mut self, delta: f64) {
        self.date_axis.dispatch_raw_delta(delta);
    }

    /// Releases the granularity-axis drag and snaps to the winning position.
    pub fn settle_timeline(&mut self, velocity: f64) -> TimelineNavPosition {
        let settled = *self.timeline_axis.settle(velocity);
        debug!(position = ?settled, "timeline axis settled");
        self.sync_date_anchors();
        settled
    }

    /// Releases the date-axis drag and snaps to the winning date.
    pub fn settle_date(&mut self, velocity: f64) -> NaiveDate {
        let settled = *self.date_axis.settle(velocity);
        debug!(%settled, "date axis settled");
        self.sync_date_anchors();
        settled
    }

    /// Position at index i spans a full viewport width of travel for a plain
    /// position and `1 - child_size_ratio` widths for a child-visible one,
    /// since part of the screen is already showing the child.
    fn update_timeline_anchors(&mut self, width: u32) {
        let current = self.current_timeline_nav_pos();
        let drag_delta = self.timeline_axis.offset_to_current();
        let ratio = self.config.child_timeline_size_ratio;

        let anchors = self
            .nav_positions
            .iter()
            .enumerate()
            .map(|(index, &pos)| Anchor {
                key: pos,
                position: ((index / 2) as f64 + (index % 2) as f64 * (1.0 - ratio))
                    * f64::from(width),
            })
            .collect();
        self.timeline_axis.update_anchors(anchors, current);

        // Re-align the raw offset so the preserved drag delta stays put
        // relative to the (possibly moved) current anchor.
        let new_pos = self.timeline_axis.position_of(&current).unwrap_or(0.0);
        let correction = new_pos + drag_delta - self.timeline_axis.offset();
        self.timeline_axis.dispatch_raw_delta(correction);
        debug!(
            width,
            count = self.nav_positions.len(),
            "updated timeline anchors"
        );
    }

    /// Rebuilds the three date anchors around the focused date.
    ///
    /// Neighbor offsets are proportional to visible-range day spans, with one
    /// viewport height of pixels representing two block-heights worth of
    /// days, so unequal blocks (28- vs 31-day months) are spaced fairly.
    fn update_date_anchors(&mut self, height: u32) {
        let nav_pos = self.current_timeline_nav_pos();
        let date = self.focused_date();
        let current_block = nav_pos.timeline.time_block_from(date);
        let current_range = visible_date_range(nav_pos, current_block).to_fractional();

        let mut anchors: Vec<Anchor<NaiveDate>> = Vec::with_capacity(3);
        if let Some(prev_block) = current_block.previous() {
            anchors.push(Anchor {
                key: prev_block.start(),
                position: neighbor_offset(current_range, nav_pos, prev_block, height),
            });
        }
        anchors.push(Anchor {
            key: date,
            position: 0.0,
        });
        if let Some(next_block) = current_block.next() {
            anchors.push(Anchor {
                key: next_block.start(),
                position: neighbor_offset(current_range, nav_pos, next_block, height),
            });
        }

        // Replacing the anchors moves the pixel position of the current
        // value; subtract its previous position so the visual offset is
        // unchanged.
        let prev_current_pos = self.date_axis.position_of(&date);
        self.date_axis.update_anchors(anchors, date);
        if let Some(pos) = prev_current_pos {
            self.date_axis.dispatch_raw_delta(-pos);
        }
        self.date_anchor_key = Some((nav_pos, date));
        trace!(height, block = %current_block, "updated date anchors");
    }

    /// Recomputes date anchors when the (granularity position, focused date)
    /// pair changed since they were last built.
    fn sync_date_anchors(&mut self) {
        let key = (self.current_timeline_nav_pos(), self.focused_date());
        if self.date_anchor_key != Some(key) {
            if let Some(viewport) = self.viewport {
                self.update_date_anchors(viewport.height);
            }
        }
    }

    /// The current position and its four one-step neighbors.
    #[must_use]
    pub fn adjacent_navigation_positions(&self) -> AdjacentNavigationPositions {
        let (prev_date, next_date) = self.date_axis.adjacent_to_current();
        let (prev_timeline, next_timeline) = self.timeline_axis.adjacent_to_current();
        let nav_pos = self.current_timeline_nav_pos();
        let date = self.focused_date();

        AdjacentNavigationPositions {
            current: NavigationPosition::derive(nav_pos, date),
            prev_date: NavigationPosition::derive(nav_pos, prev_date),
            next_date: NavigationPosition::derive(nav_pos, next_date),
            prev_timeline: NavigationPosition::derive(prev_timeline, date),
            next_timeline: NavigationPosition::derive(next_timeline, date),
        }
    }

    /// For every timeline visible in any adjacent position, the union of
    /// date ranges needed across those positions. This is what the data
    /// layer should keep warm.
    #[must_use]
    pub fn prefetch_timeline_date_ranges(&self) -> IndexMap<Timeline, DateRange> {
        let mut ranges: IndexMap<Timeline, DateRange> = IndexMap::new();
        for position in self.adjacent_navigation_positions().iter() {
            for timeline in position.timeline_nav_pos.visible_timelines() {
                ranges
                    .entry(timeline)
                    .and_modify(|range| *range = range.union(position.date_range))
                    .or_insert(position.date_range);
            }
        }
        ranges
    }

    /// The interpolation endpoints of the in-flight transition.
    ///
    /// The granularity axis wins when it is off its anchor; otherwise the
    /// date axis; otherwise both endpoints are the current position.
    #[must_use]
    pub fn transition(&self) -> NavigationTransition {
        let adjacent = self.adjacent_navigation_positions();
        let timeline_offset = self.timeline_axis.offset_to_current();
        let date_offset = self.date_axis.offset_to_current();

        let (from, to) = if timeline_offset < -OFFSET_EPSILON {
            (adjacent.prev_timeline, adjacent.current)
        } else if timeline_offset > OFFSET_EPSILON {
            (adjacent.current, adjacent.next_timeline)
        } else if date_offset < -OFFSET_EPSILON {
            (adjacent.prev_date, adjacent.current)
        } else if date_offset > OFFSET_EPSILON {
            (adjacent.current, adjacent.next_date)
        } else {
            (adjacent.current, adjacent.current)
        };

        let progress = if !self.timeline_axis.is_settled() {
            self.timeline_axis
                .progress(&from.timeline_nav_pos, &to.timeline_nav_pos)
        } else {
            self.date_axis.progress(&from.date, &to.date)
        };

        NavigationTransition { from, to, progress }
    }

    /// The visible date range as fractional days, linearly interpolated
    /// between the transition endpoints.
    #[must_use]
    pub fn visible_date_time_range(&self) -> FractionalDayRange {
        let transition = self.transition();
        transition
            .from
            .date_range
            .to_fractional()
            .lerp(transition.to.date_range.to_fractional(), transition.progress)
    }

    /// Every timeline visible at either transition endpoint, mapped to the
    /// contiguous run of its blocks spanning the margin-padded union of the
    /// endpoint date ranges. This is what must be rendered.
    pub fn active_timeline_blocks(
        &self,
    ) -> OrganizerResult<Vec<(Timeline, Vec<TimeUnitInstance>)>> {
        let transition = self.transition();

        let mut active: SmallVec<[Timeline; 4]> = SmallVec::new();
        for timeline in transition.from.timeline_nav_pos.visible_timelines() {
            active.push(timeline);
        }
        for timeline in transition.to.timeline_nav_pos.visible_timelines() {
            if !active.contains(&timeline) {
                active.push(timeline);
            }
        }

        let top = self.config.relative_top_margin;
        let bottom = self.config.relative_bottom_margin;
        let active_range = transition
            .from
            .date_range
            .with_margin(top, bottom)
            .union(transition.to.date_range.with_margin(top, bottom));

        active
            .into_iter()
            .map(|timeline| {
                let first = timeline.time_block_from(active_range.start());
                let last = timeline.time_block_from(active_range.end_inclusive());
                Ok((timeline, first.range_to(last)?.iter().collect()))
            })
            .collect()
    }

    /// Presentation role of `timeline` relative to the current position.
    ///
    /// Fails with [`OrganizerError::UnreachablePresentation`] for a timeline
    /// outside the configured set or with an undefined granularity
    /// relationship; that is a logic defect, not a recoverable state.
    pub fn presentation_role(&self, timeline: Timeline) -> OrganizerResult<TimelinePresentation> {
        if !self.timelines.contains(&timeline) {
            return Err(OrganizerError::UnreachablePresentation {
                timeline_id: timeline.id,
            });
        }

        let nav_pos = self.current_timeline_nav_pos();
        if timeline == nav_pos.timeline {
            return Ok(if nav_pos.shows_child() {
                TimelinePresentation::Parent
            } else {
                TimelinePresentation::Fullscreen
            });
        }
        if nav_pos.visible_child() == Some(timeline) {
            return Ok(TimelinePresentation::Child);
        }
        match timeline.cmp(&nav_pos.timeline) {
            std::cmp::Ordering::Less => Ok(TimelinePresentation::HiddenChild),
            std::cmp::Ordering::Greater => Ok(TimelinePresentation::HiddenParent),
            std::cmp::Ordering::Equal => Err(OrganizerError::UnreachablePresentation {
                timeline_id: timeline.id,
            }),
        }
    }
}

/// Pixel offset of a neighboring block's anchor: day distance between range
/// centers times the px/day rate averaged between the two ranges.
fn neighbor_offset(
    current_range: FractionalDayRange,
    nav_pos: TimelineNavPosition,
    neighbor_block: TimeUnitInstance,
    height: u32,
) -> f64 {
    let neighbor_range = visible_date_range(nav_pos, neighbor_block).to_fractional();
    let px_per_day = f64::from(height) * 2.0 / (neighbor_range.size() + current_range.size());
    (neighbor_range.center() - current_range.center()) * px_per_day
}
