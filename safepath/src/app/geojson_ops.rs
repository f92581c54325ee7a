use super::response::{sanitize_float, EdgeDetail, RouteResult};
use super::AppError;
use geojson::{Feature, FeatureCollection};
use safepath_core::model::map::MapModel;
use serde_json::{json, Map, Value};

/// the empty FeatureCollection returned for no-path and unrecognized
/// queries.
pub fn empty_feature_collection() -> Value {
    json!({"type": "FeatureCollection", "features": []})
}

/// one GeoJSON feature per traversed edge, LineString geometry, properties
/// carrying the edge attributes plus the query's optimization and
/// algorithm labels.
pub fn route_features(
    result: &RouteResult,
    map_model: &MapModel,
) -> Result<Vec<Feature>, AppError> {
    result
        .edges
        .iter()
        .map(|detail| {
            let linestring = map_model.get(&detail.edge_id)?;
            Ok(create_feature(detail, linestring, result))
        })
        .collect()
}

/// assembles the full `/route`-shaped document: the features plus a
/// top-level `properties` block with the aggregate statistics.
pub fn route_feature_collection(
    result: &RouteResult,
    map_model: &MapModel,
) -> Result<Value, AppError> {
    let features = route_features(result, map_model)?;

    let mut properties = Map::new();
    properties.insert(
        String::from("statistics"),
        serde_json::to_value(&result.statistics)?,
    );
    properties.insert(String::from("cost"), json!(sanitize_float(result.cost)));
    properties.insert(
        String::from("optimization"),
        Value::String(result.optimization.clone()),
    );
    properties.insert(
        String::from("algorithm"),
        Value::String(result.algorithm.clone()),
    );
    if let Some(note) = &result.note {
        properties.insert(String::from("note"), Value::String(note.clone()));
    }

    let mut foreign_members = Map::new();
    foreign_members.insert(String::from("properties"), Value::Object(properties));

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    };
    Ok(serde_json::to_value(collection)?)
}

fn create_feature(
    detail: &EdgeDetail,
    linestring: &geo::LineString<f64>,
    result: &RouteResult,
) -> Feature {
    let mut properties = Map::new();
    properties.insert(String::from("name"), Value::String(detail.name.clone()));
    properties.insert(String::from("length"), json!(sanitize_float(detail.length)));
    properties.insert(
        String::from("harassmentRisk"),
        json!(sanitize_float(detail.harassment_risk)),
    );
    properties.insert(String::from("cameras_count"), json!(detail.cameras_count));
    properties.insert(
        String::from("incidents_count"),
        json!(detail.incidents_count),
    );
    properties.insert(
        String::from("risk_score"),
        json!(sanitize_float(detail.risk_score)),
    );
    properties.insert(
        String::from("optimization"),
        Value::String(result.optimization.clone()),
    );
    properties.insert(
        String::from("algorithm"),
        Value::String(result.algorithm.clone()),
    );

    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::from(linestring)),
        id: Some(geojson::feature::Id::Number(serde_json::Number::from(
            detail.edge_id.0,
        ))),
        properties: Some(properties),
        foreign_members: None,
    }
}
