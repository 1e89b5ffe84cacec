pub mod date_range;
pub mod time_unit;
pub mod timeline;
pub mod types;

pub use date_range::{DateRange, FractionalDayRange};
pub use time_unit::{Day, Month, TimeBlock, TimeUnit, TimeUnitInstance, TimeUnitInstanceRange, Week};
pub use timeline::{Timeline, TimelineId, TimelineNavPosition};
pub use types::Viewport;
