use chrono::{DateTime, Datelike, Utc};

use super::path::TransitLeg;
use super::types::{
    FlightSummary, PhotoLink, PositionRecord, Waypoint, HOME_BASE, PHOTO_MIME,
};

/// Where the flight is right now, or `None` once the route is exhausted.
///
/// `now` is the local clock and only supplies the year the schedule is
/// normalized into; all comparisons use `summary.server_now`.
pub fn resolve_position(
    summary: &FlightSummary,
    waypoints: &[Waypoint],
    now: DateTime<Utc>,
) -> Option<PositionRecord> {
    prelaunch_position(summary)
        .or_else(|| scan_waypoints(summary.server_now, waypoints, now.year()))
}

/// Fixed marker at home base while the server clock is before launch.
pub fn prelaunch_position(summary: &FlightSummary) -> Option<PositionRecord> {
    if summary.has_launched() {
        None
    } else {
        Some(PositionRecord::at(HOME_BASE))
    }
}

/// Walk the route pairwise and stop at the first stop or leg containing `server_now`.
pub fn scan_waypoints(
    server_now: DateTime<Utc>,
    waypoints: &[Waypoint],
    year: i32,
) -> Option<PositionRecord> {
    let previous = std::iter::once(None).chain(waypoints.iter().map(Some));

    previous
        .zip(waypoints)
        .find_map(|(prev, curr)| match_waypoint(server_now, prev, curr, year))
}

fn match_waypoint(
    server_now: DateTime<Utc>,
    prev: Option<&Waypoint>,
    curr: &Waypoint,
    year: i32,
) -> Option<PositionRecord> {
    let Some(arrival) = curr.arrival.at_year(year) else {
        log::warn!("waypoint {} arrival does not exist in {}", curr.id, year);
        return None;
    };
    let Some(departure) = curr.departure.at_year(year) else {
        log::warn!("waypoint {} departure does not exist in {}", curr.id, year);
        return None;
    };

    if arrival <= server_now && server_now <= departure {
        log::debug!(
            "at rest in {}, {} ({} presents delivered)",
            curr.city,
            curr.region,
            curr.presents_delivered
        );
        return Some(at_rest(curr));
    }

    if server_now < arrival {
        let prev = prev?;
        let left = prev.departure.at_year(year)?;
        log::debug!(
            "in transit {}, {} -> {}, {}",
            prev.city,
            prev.region,
            curr.city,
            curr.region
        );
        return Some(in_transit(prev, curr, left, arrival, server_now));
    }

    None
}

fn at_rest(stop: &Waypoint) -> PositionRecord {
    let links = stop
        .photos
        .iter()
        .enumerate()
        .map(|(i, photo)| PhotoLink {
            url: photo.url.clone(),
            mime: PHOTO_MIME.to_string(),
            remarks: format!("Photo of {}, {} #{}", stop.city, stop.region, i),
        })
        .collect();

    PositionRecord::at(stop.coordinate)
        .with_remarks(format!(
            "Delivering presents in {}, {}\nPopulation: {}",
            stop.city, stop.region, stop.population
        ))
        .with_photo_links(links)
}

fn in_transit(
    prev: &Waypoint,
    curr: &Waypoint,
    left: DateTime<Utc>,
    arrives: DateTime<Utc>,
    server_now: DateTime<Utc>,
) -> PositionRecord {
    let total = (arrives - left).num_milliseconds();
    let elapsed = (server_now - left).num_milliseconds();
    let fraction = if total > 0 {
        elapsed as f64 / total as f64
    } else {
        1.0
    };

    let position = TransitLeg::new(prev.coordinate, curr.coordinate).point_at(fraction);

    PositionRecord::at(position).with_remarks(format!(
        "in transit from {},{} to {},{}",
        prev.city, prev.region, curr.city, curr.region
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::schedule::ScheduleTime;
    use crate::resolver::types::{Coordinate, Photo};
    use chrono::TimeZone;
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-6;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 25, h, m, 0).unwrap()
    }

    fn waypoint(
        city: &str,
        region: &str,
        coordinate: Coordinate,
        arrival: DateTime<Utc>,
        departure: DateTime<Utc>,
        photos: usize,
    ) -> Waypoint {
        Waypoint {
            id: city.to_lowercase(),
            arrival: ScheduleTime::from_datetime(arrival),
            departure: ScheduleTime::from_datetime(departure),
            population: 1_000_000,
            presents_delivered: 42,
            city: city.to_string(),
            region: region.to_string(),
            coordinate,
            timezone_offset: 32400,
            photos: (0..photos)
                .map(|i| Photo {
                    url: format!("https://example.org/{}/{}", city, i),
                })
                .collect(),
        }
    }

    fn tokyo() -> Waypoint {
        waypoint(
            "Tokyo",
            "Japan",
            Coordinate {
                lat: 35.6762,
                lng: 139.6503,
            },
            at(10, 0),
            at(10, 5),
            3,
        )
    }

    fn seoul() -> Waypoint {
        waypoint(
            "Seoul",
            "South Korea",
            Coordinate {
                lat: 37.5665,
                lng: 126.9780,
            },
            at(10, 15),
            at(10, 20),
            0,
        )
    }

    fn summary(server_now: DateTime<Utc>, launch_time: DateTime<Utc>) -> FlightSummary {
        FlightSummary {
            status: "OK".to_string(),
            server_now,
            launch_time,
            duration_seconds: 86_400,
            origin_location: "North Pole".to_string(),
            route_refs: vec!["https://example.org/route.json".to_string()],
        }
    }

    #[test]
    fn before_launch_is_home_base() {
        let s = summary(at(10, 0), at(12, 0));
        let record = resolve_position(&s, &[tokyo(), seoul()], at(9, 0)).unwrap();
        assert_eq!(record.coordinate, HOME_BASE);
        assert_eq!(record.remarks, None);
        assert!(record.photo_links.is_empty());
        assert_eq!(record.id, "santa");
    }

    #[test]
    fn after_launch_without_waypoints_is_empty() {
        let s = summary(at(13, 0), at(12, 0));
        assert_eq!(resolve_position(&s, &[], at(13, 0)), None);
    }

    #[test]
    fn at_rest_in_tokyo() {
        let s = summary(at(10, 2), at(9, 0));
        let record = resolve_position(&s, &[tokyo()], at(10, 2)).unwrap();
        assert_eq!(record.coordinate, tokyo().coordinate);
        assert!(record.remarks.as_deref().unwrap().contains("Tokyo"));
        assert_eq!(
            record.remarks.as_deref(),
            Some("Delivering presents in Tokyo, Japan\nPopulation: 1000000")
        );
        assert_eq!(record.photo_links.len(), 3);
        for (i, link) in record.photo_links.iter().enumerate() {
            assert_eq!(link.remarks, format!("Photo of Tokyo, Japan #{}", i));
            assert_eq!(link.mime, "text/html");
        }
    }

    #[rstest]
    #[case(at(10, 0))]
    #[case(at(10, 5))]
    fn stop_window_is_inclusive(#[case] server_now: DateTime<Utc>) {
        let record = scan_waypoints(server_now, &[tokyo(), seoul()], 2024).unwrap();
        assert_eq!(record.coordinate, tokyo().coordinate);
    }

    #[test]
    fn midway_between_tokyo_and_seoul() {
        let s = summary(at(10, 10), at(9, 0));
        let record = resolve_position(&s, &[tokyo(), seoul()], at(10, 10)).unwrap();
        let (a, b) = (tokyo().coordinate, seoul().coordinate);
        assert!((record.coordinate.lng - (a.lng + b.lng) / 2.0).abs() < TOLERANCE);
        assert!((record.coordinate.lat - (a.lat + b.lat) / 2.0).abs() < TOLERANCE);
        assert!(record.photo_links.is_empty());
        assert_eq!(
            record.remarks.as_deref(),
            Some("in transit from Tokyo,Japan to Seoul,South Korea")
        );
    }

    #[rstest]
    #[case(6, 0.1)]
    #[case(9, 0.4)]
    #[case(14, 0.9)]
    fn transit_position_is_proportional_to_elapsed_time(#[case] minute: u32, #[case] fraction: f64) {
        let record = scan_waypoints(at(10, minute), &[tokyo(), seoul()], 2024).unwrap();
        let (a, b) = (tokyo().coordinate, seoul().coordinate);
        assert!((record.coordinate.lng - (a.lng + (b.lng - a.lng) * fraction)).abs() < TOLERANCE);
        assert!((record.coordinate.lat - (a.lat + (b.lat - a.lat) * fraction)).abs() < TOLERANCE);
    }

    #[test]
    fn single_stop_not_yet_reached_is_empty() {
        assert_eq!(scan_waypoints(at(9, 30), &[tokyo()], 2024), None);
    }

    #[test]
    fn before_first_stop_clamps_to_start_of_first_leg() {
        let record = scan_waypoints(at(9, 30), &[tokyo(), seoul()], 2024).unwrap();
        assert_eq!(record.coordinate, tokyo().coordinate);
        assert_eq!(
            record.remarks.as_deref(),
            Some("in transit from Tokyo,Japan to Seoul,South Korea")
        );
    }

    #[test]
    fn after_last_stop_is_empty() {
        assert_eq!(scan_waypoints(at(11, 0), &[tokyo(), seoul()], 2024), None);
    }

    #[test]
    fn waypoints_recorded_in_another_year_are_normalized() {
        let mut old = tokyo();
        old.arrival =
            ScheduleTime::from_datetime(Utc.with_ymd_and_hms(2015, 12, 25, 10, 0, 0).unwrap());
        old.departure =
            ScheduleTime::from_datetime(Utc.with_ymd_and_hms(2015, 12, 25, 10, 5, 0).unwrap());
        let s = summary(at(10, 2), at(9, 0));
        let record = resolve_position(&s, &[old], at(10, 2)).unwrap();
        assert_eq!(record.coordinate, tokyo().coordinate);
    }

    #[test]
    fn reference_year_comes_from_local_clock() {
        let s = summary(at(10, 2), at(9, 0));
        let next_year = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        // schedule lands in 2025, far after the server clock
        assert!(resolve_position(&s, &[tokyo()], next_year).is_none());
    }

    #[test]
    fn resolving_twice_gives_identical_output() {
        let s = summary(at(10, 7), at(9, 0));
        let route = [tokyo(), seoul()];
        assert_eq!(
            resolve_position(&s, &route, at(10, 7)),
            resolve_position(&s, &route, at(10, 7))
        );
    }
}
