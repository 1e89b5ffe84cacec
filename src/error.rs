use thiserror::Error;

use crate::core::time_unit::TimeUnit;
use crate::core::timeline::TimelineId;

pub type OrganizerResult<T> = Result<T, OrganizerError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrganizerError {
    #[error("cannot compare time unit instances of different kinds: {left:?} vs {right:?}")]
    InvalidComparison { left: TimeUnit, right: TimeUnit },

    #[error("cannot build a range over different time unit kinds: {start:?}..{end:?}")]
    InvalidRange { start: TimeUnit, end: TimeUnit },

    #[error("timeline {timeline_id:?} has no defined presentation relative to the current position")]
    UnreachablePresentation { timeline_id: TimelineId },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
