use crate::util::geo::{endpoint_bbox, parse_coordinate};
use geo::{BoundingRect, Coord, LineString, Rect};
use serde::Deserialize;
use wkt::TryFromWkt;

/// one directed street segment as it appears in the unified dataset CSV,
/// before any validation. numeric columns deserialize as `Option<f64>` so
/// that empty cells (how the unification pipeline writes NaN) survive long
/// enough to be handled by the validation rules instead of aborting the
/// whole file.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEdgeRecord {
    pub origin: String,
    pub destination: String,
    pub name: Option<String>,
    pub length: Option<f64>,
    pub oneway: Option<String>,
    pub geometry: String,
    #[serde(rename = "harassmentRisk")]
    pub harassment_risk: Option<f64>,
    pub cameras_count: Option<f64>,
    pub incidents_count: Option<f64>,
    pub incidents_severity: Option<f64>,
    pub risk_score: Option<f64>,
    pub combined_cost: Option<f64>,
}

/// a validated dataset row: parsed endpoint coordinates, sanitized metrics,
/// parsed polyline geometry, and the precomputed bounding box used by the
/// edge spatial index and the corridor selector.
#[derive(Clone, Debug)]
pub struct EdgeRow {
    pub origin: Coord<f64>,
    pub destination: Coord<f64>,
    pub name: Option<String>,
    pub length_m: f64,
    pub oneway: bool,
    pub harassment_risk: f64,
    pub cameras_count: u32,
    pub incidents_count: u32,
    pub incidents_severity: f64,
    pub risk_score: f64,
    pub combined_cost: f64,
    pub geometry: LineString<f64>,
    pub bbox: Rect<f64>,
}

impl TryFrom<RawEdgeRecord> for EdgeRow {
    type Error = String;

    /// validation rules:
    /// - origin/destination must parse as `"(lon, lat)"`; a row whose
    ///   endpoints coincide is a self-loop and is rejected
    /// - geometry must parse as a WKT LINESTRING; the bbox falls back to the
    ///   endpoint bbox when the polyline is degenerate
    /// - a missing `incidents_count` becomes 0; every other missing numeric
    ///   field rejects the row
    /// - NaN in any numeric field becomes 0 so all weights stay finite;
    ///   negative weights are rejected
    /// - `oneway` accepts the usual boolean spellings, empty means false
    fn try_from(raw: RawEdgeRecord) -> Result<Self, Self::Error> {
        let origin = parse_coordinate(&raw.origin).map_err(|e| format!("bad origin: {}", e))?;
        let destination =
            parse_coordinate(&raw.destination).map_err(|e| format!("bad destination: {}", e))?;
        if origin == destination {
            return Err(String::from("self-loop edges are not permitted"));
        }

        let geometry: LineString<f64> = LineString::try_from_wkt_str(raw.geometry.trim())
            .map_err(|e| format!("bad geometry '{}': {}", raw.geometry, e))?;
        let bbox = geometry
            .bounding_rect()
            .unwrap_or_else(|| endpoint_bbox(&origin, &destination));

        let length_m = required_non_negative("length", raw.length)?;
        let harassment_risk = required_non_negative("harassmentRisk", raw.harassment_risk)?;
        let incidents_severity =
            required_non_negative("incidents_severity", raw.incidents_severity)?;
        let risk_score = required_non_negative("risk_score", raw.risk_score)?;
        let combined_cost = required_non_negative("combined_cost", raw.combined_cost)?;
        let cameras_count = required_count("cameras_count", raw.cameras_count)?;
        let incidents_count = count_or_zero(raw.incidents_count);

        let name = raw.name.filter(|n| !n.trim().is_empty());
        let oneway = parse_oneway(raw.oneway.as_deref())?;

        Ok(EdgeRow {
            origin,
            destination,
            name,
            length_m,
            oneway,
            harassment_risk,
            cameras_count,
            incidents_count,
            incidents_severity,
            risk_score,
            combined_cost,
            geometry,
            bbox,
        })
    }
}

fn required_non_negative(field: &str, value: Option<f64>) -> Result<f64, String> {
    let v = value.ok_or_else(|| format!("missing required field '{}'", field))?;
    if v.is_nan() {
        return Ok(0.0);
    }
    if v < 0.0 || !v.is_finite() {
        return Err(format!("field '{}' must be a non-negative real, got {}", field, v));
    }
    Ok(v)
}

fn required_count(field: &str, value: Option<f64>) -> Result<u32, String> {
    let v = value.ok_or_else(|| format!("missing required field '{}'", field))?;
    Ok(if v.is_nan() { 0 } else { v.max(0.0) as u32 })
}

fn count_or_zero(value: Option<f64>) -> u32 {
    match value {
        Some(v) if !v.is_nan() => v.max(0.0) as u32,
        _ => 0,
    }
}

fn parse_oneway(value: Option<&str>) -> Result<bool, String> {
    match value.map(|s| s.trim()) {
        None | Some("") => Ok(false),
        Some(s) => match s.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(format!("unrecognized oneway value '{}'", other)),
        },
    }
}
