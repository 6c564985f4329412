use geo::{Distance, Euclidean, InterpolatePoint, Line, Point};

use super::types::Coordinate;

/// Straight flight path between two stops in (lng, lat) space.
#[derive(Debug, Clone, Copy)]
pub struct TransitLeg(Line);

impl TransitLeg {
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        TransitLeg(Line::new(
            Point::new(from.lng, from.lat),
            Point::new(to.lng, to.lat),
        ))
    }

    /// Planar length of the leg in degrees.
    pub fn length(&self) -> f64 {
        Euclidean.distance(self.0.start_point(), self.0.end_point())
    }

    /// Point reached after covering `fraction` of the leg. `fraction` is clamped to [0, 1].
    pub fn point_at(&self, fraction: f64) -> Coordinate {
        let (start, end) = self.0.points();
        let length = self.length();
        let p = if length > 0.0 {
            Euclidean.point_at_distance_between(start, end, fraction.clamp(0.0, 1.0) * length)
        } else {
            start
        };
        Coordinate {
            lat: p.y(),
            lng: p.x(),
        }
    }
}
