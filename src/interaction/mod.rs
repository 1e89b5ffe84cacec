//! Deterministic anchored-drag primitive.
//!
//! This is the crate's stand-in for the platform drag/fling physics: a pure
//! state machine with no animation clock. Gesture capture feeds raw pixel
//! deltas in, and a settle step resolves the target anchor from positional
//! and velocity thresholds.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{OrganizerError, OrganizerResult};

/// Snap resolution thresholds for [`AnchoredDraggable::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Fraction of the distance to the adjacent anchor past which a released
    /// drag snaps forward instead of back.
    pub positional_threshold_ratio: f64,
    /// Release velocity (px/s) above which the drag snaps in the velocity
    /// direction regardless of position.
    pub velocity_threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            positional_threshold_ratio: 0.5,
            velocity_threshold: 125.0,
        }
    }
}

impl SnapConfig {
    pub fn validate(self) -> OrganizerResult<Self> {
        if !self.positional_threshold_ratio.is_finite()
            || self.positional_threshold_ratio <= 0.0
            || self.positional_threshold_ratio >= 1.0
        {
            return Err(OrganizerError::InvalidConfig(
                "positional threshold ratio must be in (0, 1)".to_owned(),
            ));
        }
        if !self.velocity_threshold.is_finite() || self.velocity_threshold < 0.0 {
            return Err(OrganizerError::InvalidConfig(
                "velocity threshold must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// A discrete snap position with its pixel offset along the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor<K> {
    pub key: K,
    pub position: f64,
}

const SETTLE_EPSILON: f64 = 1e-6;

/// A drag axis over a set of positioned anchors.
///
/// Holds a current value among the anchors and a raw pixel offset. All
/// transition queries (`offset_to_current`, `progress`, adjacency) are pure
/// functions of those two pieces of state. Replacing the anchor set keeps
/// the raw offset untouched; offset corrections are the caller's
/// responsibility via [`AnchoredDraggable::dispatch_raw_delta`].
#[derive(Debug, Clone)]
pub struct AnchoredDraggable<K> {
    anchors: Vec<Anchor<K>>,
    current: K,
    offset: f64,
    snap: SnapConfig,
}

impl<K: Clone + PartialEq> AnchoredDraggable<K> {
    /// Creates an axis with no anchors yet; it reports as settled until the
    /// first [`AnchoredDraggable::update_anchors`].
    #[must_use]
    pub fn new(initial: K, snap: SnapConfig) -> Self {
        Self {
            anchors: Vec::new(),
            current: initial,
            offset: 0.0,
            snap,
        }
    }

    #[must_use]
    pub fn current_value(&self) -> &K {
        &self.current
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn position_of(&self, key: &K) -> Option<f64> {
        self.anchors
            .iter()
            .find(|anchor| anchor.key == *key)
            .map(|anchor| anchor.position)
    }

    /// Raw offset relative to the current anchor position.
    ///
    /// Zero when the current anchor is not positioned (no anchors yet).
    #[must_use]
    pub fn offset_to_current(&self) -> f64 {
        match self.position_of(&self.current) {
            Some(position) => self.offset - position,
            None => 0.0,
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.offset_to_current().abs() <= SETTLE_EPSILON
    }

    /// Transition progress from `from` toward `to`, clamped to `[0, 1]`.
    ///
    /// `1.0` when the endpoints coincide.
    #[must_use]
    pub fn progress(&self, from: &K, to: &K) -> f64 {
        let (Some(from_pos), Some(to_pos)) = (self.position_of(from), self.position_of(to))
        else {
            return 1.0;
        };
        let span = to_pos - from_pos;
        if span.abs() <= SETTLE_EPSILON {
            return 1.0;
        }
        ((self.offset - from_pos) / span).clamp(0.0, 1.0)
    }

    /// The anchors immediately before and after the current one.
    ///
    /// At the ends of the anchor set the missing neighbor collapses to the
    /// current value; there is no wraparound.
    #[must_use]
    pub fn adjacent_to_current(&self) -> (K, K) {
        let Some(index) = self
            .anchors
            .iter()
            .position(|anchor| anchor.key == self.current)
        else {
            return (self.current.clone(), self.current.clone());
        };
        let prev = match index.checked_sub(1) {
            Some(prev_index) => self.anchors[prev_index].key.clone(),
            None => self.current.clone(),
        };
        let next = match self.anchors.get(index + 1) {
            Some(anchor) => anchor.key.clone(),
            None => self.current.clone(),
        };
        (prev, next)
    }

    /// Replaces the anchor set and retargets the axis at `new_target`.
    ///
    /// The raw offset is intentionally left untouched even though anchor
    /// positions moved; callers re-align it with
    /// [`AnchoredDraggable::dispatch_raw_delta`] so the on-screen position
    /// does not jump.
    pub fn update_anchors(&mut self, mut anchors: Vec<Anchor<K>>, new_target: K) {
        anchors.sort_by_key(|anchor| OrderedFloat(anchor.position));
        self.anchors = anchors;
        self.current = new_target;
    }

    /// Applies a raw drag delta in pixels.
    pub fn dispatch_raw_delta(&mut self, delta: f64) {
        self.offset += delta;
    }

    /// Resolves the drag at release time and snaps to the winning anchor.
    ///
    /// Moves at most one anchor per settle: a fast fling wins the neighbor in
    /// the velocity direction, a slow release past the positional threshold
    /// wins the neighbor in the offset direction, anything else snaps back.
    pub fn settle(&mut self, velocity: f64) -> &K {
        let Some(current_pos) = self.position_of(&self.current) else {
            return &self.current;
        };
        let delta = self.offset - current_pos;
        let (prev, next) = self.adjacent_to_current();

        let target = if velocity.abs() > self.snap.velocity_threshold {
            if velocity > 0.0 { next } else { prev }
        } else if delta > SETTLE_EPSILON {
            let next_pos = self.position_of(&next).unwrap_or(current_pos);
            let distance = next_pos - current_pos;
            if distance > 0.0 && delta >= distance * self.snap.positional_threshold_ratio {
                next
            } else {
                self.current.clone()
            }
        } else if delta < -SETTLE_EPSILON {
            let prev_pos = self.position_of(&prev).unwrap_or(current_pos);
            let distance = current_pos - prev_pos;
            if distance > 0.0 && -delta >= distance * self.snap.positional_threshold_ratio {
                prev
            } else {
                self.current.clone()
            }
        } else {
            self.current.clone()
        };

        self.offset = self.position_of(&target).unwrap_or(current_pos);
        self.current = target;
        &self.current
    }
}
