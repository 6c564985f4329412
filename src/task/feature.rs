use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use serde_json::json;

use crate::resolver::PositionRecord;

pub fn to_feature(record: &PositionRecord) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("callsign".into(), json!(record.display_name));
    if let Some(remarks) = &record.remarks {
        properties.insert("remarks".into(), json!(remarks));
    }
    if !record.photo_links.is_empty() {
        let links = record
            .photo_links
            .iter()
            .map(|l| json!({ "url": l.url, "mime": l.mime, "remarks": l.remarks }))
            .collect();
        properties.insert("links".into(), JsonValue::Array(links));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            record.coordinate.lng,
            record.coordinate.lat,
        ]))),
        id: Some(Id::String(record.id.clone())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Zero or one feature, ready for submission.
pub fn feature_collection(record: Option<&PositionRecord>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: record.map(to_feature).into_iter().collect(),
        foreign_members: None,
    }
}
