//! GeoJSON plumbing for the content layer: normalization to a
//! FeatureCollection, extent computation, and the per-feature ids the
//! hover/selection filters key on.

use serde_json::{json, Map, Value};

use crate::error::AppError;

/// Property injected into every feature so layer filters can address it.
pub const FEATURE_KEY: &str = "geojson_app_unique";

/// Bounding box as `[west, south, east, north]`.
pub type Extent = [f64; 4];

const GEOMETRY_TYPES: [&str; 7] = [
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
];

fn type_of(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

/// Wrap any valid GeoJSON value into a FeatureCollection: a bare geometry
/// becomes a Feature, a Feature becomes a single-member collection, and a
/// FeatureCollection passes through.
pub fn normalize(value: Value) -> Result<Value, AppError> {
    match type_of(&value) {
        Some("FeatureCollection") => Ok(value),
        Some("Feature") => Ok(json!({ "type": "FeatureCollection", "features": [value] })),
        Some(t) if GEOMETRY_TYPES.contains(&t) => Ok(json!({
            "type": "FeatureCollection",
            "features": [{ "type": "Feature", "properties": {}, "geometry": value }],
        })),
        _ => Err(AppError::Document {
            message: "not a GeoJSON object".to_string(),
        }),
    }
}

/// Tag each feature's properties with its index so layer filters and the
/// drawer can refer back to it. Operates on a Feature or FeatureCollection;
/// anything else is left untouched.
pub fn tag_feature_ids(value: &mut Value) {
    match type_of(value) {
        Some("FeatureCollection") => {
            if let Some(features) = value.get_mut("features").and_then(Value::as_array_mut) {
                for (index, feature) in features.iter_mut().enumerate() {
                    set_feature_key(feature, index as u64);
                }
            }
        }
        Some("Feature") => set_feature_key(value, 0),
        _ => {}
    }
}

fn set_feature_key(feature: &mut Value, id: u64) {
    if !feature.get("properties").is_some_and(Value::is_object) {
        if let Some(obj) = feature.as_object_mut() {
            obj.insert("properties".to_string(), Value::Object(Map::new()));
        }
    }
    if let Some(props) = feature.get_mut("properties").and_then(Value::as_object_mut) {
        props.insert(FEATURE_KEY.to_string(), json!(id));
    }
}

/// Compute the `[w, s, e, n]` extent over every coordinate in the value.
/// Returns `None` when there are no coordinates at all.
pub fn extent(value: &Value) -> Option<Extent> {
    let mut bounds: Option<Extent> = None;
    collect_extent(value, &mut bounds);
    bounds
}

fn collect_extent(value: &Value, bounds: &mut Option<Extent>) {
    match type_of(value) {
        Some("FeatureCollection") => {
            if let Some(features) = value.get("features").and_then(Value::as_array) {
                for feature in features {
                    collect_extent(feature, bounds);
                }
            }
        }
        Some("Feature") => {
            if let Some(geometry) = value.get("geometry") {
                collect_extent(geometry, bounds);
            }
        }
        Some("GeometryCollection") => {
            if let Some(geometries) = value.get("geometries").and_then(Value::as_array) {
                for geometry in geometries {
                    collect_extent(geometry, bounds);
                }
            }
        }
        Some(_) => {
            if let Some(coords) = value.get("coordinates") {
                collect_positions(coords, bounds);
            }
        }
        None => {}
    }
}

fn collect_positions(coords: &Value, bounds: &mut Option<Extent>) {
    let Some(array) = coords.as_array() else {
        return;
    };
    // A position is an array starting with two numbers; anything else is a
    // nested coordinate array.
    if let (Some(x), Some(y)) = (
        array.first().and_then(Value::as_f64),
        array.get(1).and_then(Value::as_f64),
    ) {
        extend(bounds, x, y);
        return;
    }
    for inner in array {
        collect_positions(inner, bounds);
    }
}

fn extend(bounds: &mut Option<Extent>, x: f64, y: f64) {
    match bounds {
        Some([w, s, e, n]) => {
            *w = w.min(x);
            *s = s.min(y);
            *e = e.max(x);
            *n = n.max(y);
        }
        None => *bounds = Some([x, y, x, y]),
    }
}
