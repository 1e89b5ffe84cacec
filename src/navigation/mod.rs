pub mod config;
pub mod position;
pub mod state;

pub use config::NavigationConfig;
pub use position::{
    AdjacentNavigationPositions, NavigationPosition, NavigationTransition, TimelinePresentation,
    visible_date_range,
};
pub use state::NavigationState;
