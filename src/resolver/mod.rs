mod path;
mod resolver;
mod schedule;
mod types;

pub use resolver::{prelaunch_position, resolve_position};
pub use schedule::ScheduleTime;
pub use types::{Coordinate, FlightSummary, Photo, PositionRecord, Waypoint};

#[cfg(test)]
pub use types::{PhotoLink, HOME_BASE};
