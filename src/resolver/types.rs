use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schedule::ScheduleTime;

pub const ENTITY_ID: &str = "santa";
pub const CALLSIGN: &str = "Santa";
pub const PHOTO_MIME: &str = "text/html";

/// The North Pole, where every flight starts.
pub const HOME_BASE: Coordinate = Coordinate {
    lat: 90.0,
    lng: 90.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
}

/// Status window of the current flight, fetched fresh on every poll.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSummary {
    pub status: String,
    pub server_now: DateTime<Utc>,
    pub launch_time: DateTime<Utc>,
    pub duration_seconds: i64,
    pub origin_location: String,
    pub route_refs: Vec<String>,
}

impl FlightSummary {
    pub fn has_launched(&self) -> bool {
        self.server_now >= self.launch_time
    }
}

/// A scheduled stop. Arrival and departure carry no meaningful year.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub id: String,
    pub arrival: ScheduleTime,
    pub departure: ScheduleTime,
    pub population: u64,
    pub presents_delivered: u64,
    pub city: String,
    pub region: String,
    pub coordinate: Coordinate,
    #[allow(dead_code)]
    pub timezone_offset: i32,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoLink {
    pub url: String,
    pub mime: String,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    pub id: String,
    pub display_name: String,
    pub remarks: Option<String>,
    pub photo_links: Vec<PhotoLink>,
    pub coordinate: Coordinate,
}

impl PositionRecord {
    pub fn at(coordinate: Coordinate) -> Self {
        Self {
            id: ENTITY_ID.to_string(),
            display_name: CALLSIGN.to_string(),
            remarks: None,
            photo_links: Vec::new(),
            coordinate,
        }
    }

    pub fn with_remarks(mut self, remarks: String) -> Self {
        self.remarks = Some(remarks);
        self
    }

    pub fn with_photo_links(mut self, links: Vec<PhotoLink>) -> Self {
        self.photo_links = links;
        self
    }
}
