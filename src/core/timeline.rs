use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::time_unit::{TimeUnit, TimeUnitInstance};

/// Stable identity of a timeline within a configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TimelineId(pub u32);

/// An identified navigation channel bound to one [`TimeUnit`].
///
/// Timelines are totally ordered by granularity (finest first), with the id
/// disambiguating timelines of equal granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeline {
    pub id: TimelineId,
    pub unit: TimeUnit,
}

impl Timeline {
    #[must_use]
    pub fn new(id: u32, unit: TimeUnit) -> Self {
        Self {
            id: TimelineId(id),
            unit,
        }
    }

    /// The block of this timeline that contains `date`.
    #[must_use]
    pub fn time_block_from(self, date: NaiveDate) -> TimeUnitInstance {
        self.unit.instance_from(date)
    }
}

impl Ord for Timeline {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unit
            .reference_size()
            .total_cmp(&other.unit.reference_size())
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Timeline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A discrete point on the granularity axis: a timeline, optionally paired
/// with its next-finer child timeline being visible alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimelineNavPosition {
    pub timeline: Timeline,
    pub child: Option<Timeline>,
}

impl TimelineNavPosition {
    #[must_use]
    pub fn plain(timeline: Timeline) -> Self {
        Self {
            timeline,
            child: None,
        }
    }

    #[must_use]
    pub fn with_child(timeline: Timeline, child: Timeline) -> Self {
        Self {
            timeline,
            child: Some(child),
        }
    }

    #[must_use]
    pub fn shows_child(self) -> bool {
        self.child.is_some()
    }

    #[must_use]
    pub fn visible_child(self) -> Option<Timeline> {
        self.child
    }

    /// Timelines actually rendered at this position, finest first.
    #[must_use]
    pub fn visible_timelines(self) -> SmallVec<[Timeline; 2]> {
        let mut timelines = SmallVec::new();
        if let Some(child) = self.child {
            timelines.push(child);
        }
        timelines.push(self.timeline);
        timelines
    }

    /// The full ordered anchor sequence for the granularity axis.
    ///
    /// Input timelines are sorted finest first; each timeline except the
    /// finest contributes a child-visible variant immediately before its
    /// plain form, yielding `2N - 1` positions. The sequence is fixed for
    /// the lifetime of a navigation session.
    #[must_use]
    pub fn sequence(timelines: &[Timeline]) -> Vec<Self> {
        let mut sorted: Vec<Timeline> = timelines.to_vec();
        sorted.sort();

        let mut positions = Vec::with_capacity(sorted.len().saturating_mul(2).saturating_sub(1));
        for (index, &timeline) in sorted.iter().enumerate() {
            if index > 0 {
                positions.push(Self::with_child(timeline, sorted[index - 1]));
            }
            positions.push(Self::plain(timeline));
        }
        positions
    }
}
