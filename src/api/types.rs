use chrono::DateTime;
use serde::Deserialize;

use super::error::ApiError;
use crate::resolver::{Coordinate, FlightSummary, Photo, ScheduleTime, Waypoint};

/// Body of the `/info` endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InfoResponse {
    pub status: String,
    #[allow(dead_code)]
    pub v: String,
    pub now: i64,
    pub takeoff: i64,
    pub duration: i64,
    pub location: String,
    /// Absent in the degraded variant of the response.
    #[serde(default)]
    pub route: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RouteResponse {
    pub destinations: Vec<Destination>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub arrival: i64,
    pub departure: i64,
    pub population: u64,
    pub presents_delivered: u64,
    pub city: String,
    pub region: String,
    pub location: Coordinate,
    pub details: Details,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Details {
    pub timezone: i32,
    pub photos: Vec<Photo>,
}

impl TryFrom<InfoResponse> for FlightSummary {
    type Error = ApiError;

    fn try_from(info: InfoResponse) -> Result<Self, Self::Error> {
        let server_now =
            DateTime::from_timestamp_millis(info.now).ok_or(ApiError::InvalidTimestamp(info.now))?;
        let launch_time = DateTime::from_timestamp_millis(info.takeoff)
            .ok_or(ApiError::InvalidTimestamp(info.takeoff))?;

        Ok(FlightSummary {
            status: info.status,
            server_now,
            launch_time,
            duration_seconds: info.duration,
            origin_location: info.location,
            route_refs: info.route,
        })
    }
}

impl TryFrom<Destination> for Waypoint {
    type Error = ApiError;

    fn try_from(dest: Destination) -> Result<Self, Self::Error> {
        let arrival =
            ScheduleTime::from_millis(dest.arrival).ok_or(ApiError::InvalidTimestamp(dest.arrival))?;
        let departure = ScheduleTime::from_millis(dest.departure)
            .ok_or(ApiError::InvalidTimestamp(dest.departure))?;

        Ok(Waypoint {
            id: dest.id,
            arrival,
            departure,
            population: dest.population,
            presents_delivered: dest.presents_delivered,
            city: dest.city,
            region: dest.region,
            coordinate: dest.location,
            timezone_offset: dest.details.timezone,
            photos: dest.details.photos,
        })
    }
}

impl RouteResponse {
    pub fn into_waypoints(self) -> Result<Vec<Waypoint>, ApiError> {
        self.destinations.into_iter().map(Waypoint::try_from).collect()
    }
}
