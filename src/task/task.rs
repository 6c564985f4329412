use chrono::{DateTime, Utc};
use geojson::FeatureCollection;

use super::error::TaskError;
use super::feature::feature_collection;
use super::sink::FeatureSink;
use crate::api::FlightSource;
use crate::resolver::{prelaunch_position, resolve_position, PositionRecord};

/// One poll: fetch, resolve, submit. Holds no state between polls.
pub struct Task<S, K> {
    source: S,
    sink: K,
    debug: bool,
    server_clock: Option<DateTime<Utc>>,
}

impl<S: FlightSource, K: FeatureSink> Task<S, K> {
    pub fn new(source: S, sink: K, debug: bool) -> Self {
        Self {
            source,
            sink,
            debug,
            server_clock: None,
        }
    }

    /// Pretend the upstream server clock reads `at`.
    pub fn with_server_clock(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.server_clock = at;
        self
    }

    pub async fn control(&self) -> Result<FeatureCollection, TaskError> {
        let record = self.locate(Utc::now()).await?;
        let fc = feature_collection(record.as_ref());

        if self.debug {
            match serde_json::to_string(&fc) {
                Ok(json) => log::info!("{}", json),
                Err(e) => log::warn!("cannot render results: {}", e),
            }
        }

        self.sink.submit(&fc).await?;
        Ok(fc)
    }

    async fn locate(&self, now: DateTime<Utc>) -> Result<Option<PositionRecord>, TaskError> {
        let mut summary = self.source.summary().await?;
        if let Some(at) = self.server_clock {
            summary.server_now = at;
        }
        log::debug!(
            "status {} now {} takeoff {} from {} for {}s",
            summary.status,
            summary.server_now,
            summary.launch_time,
            summary.origin_location,
            summary.duration_seconds
        );

        if let Some(home) = prelaunch_position(&summary) {
            log::info!("not yet launched");
            return Ok(Some(home));
        }

        let Some(route_ref) = summary.route_refs.first() else {
            log::info!("no route published");
            return Ok(None);
        };

        let waypoints = self.source.waypoints(route_ref).await?;
        log::debug!("{} waypoints from {}", waypoints.len(), route_ref);

        let record = resolve_position(&summary, &waypoints, now);
        if record.is_none() {
            log::info!("no current position on route");
        }
        Ok(record)
    }
}
