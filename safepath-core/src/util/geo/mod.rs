use geo::{Coord, Rect};

/// approximate meters spanned by one degree of latitude in WGS84.
/// longitude degrees are scaled by the cosine of the reference latitude.
pub const DEGREE_TO_METERS: f64 = 111_000.0;

/// lower clamp applied to `cos(lat)` when converting longitude degrees,
/// which keeps the conversion finite near the poles.
const MIN_COS_LAT: f64 = 0.1;

/// straight-line distance in meters between two WGS84 coordinates using the
/// flat-earth approximation (1 degree is roughly 111 km, longitude scaled by
/// the cosine of the mean latitude). adequate at city scale, where the
/// corridor margins and A* heuristics built on top of it are used.
pub fn straight_line_meters(src: &Coord<f64>, dst: &Coord<f64>) -> f64 {
    let mean_lat = ((src.y + dst.y) / 2.0).to_radians();
    let dx = (src.x - dst.x) * DEGREE_TO_METERS * mean_lat.cos().abs();
    let dy = (src.y - dst.y) * DEGREE_TO_METERS;
    (dx * dx + dy * dy).sqrt()
}

/// converts a buffer in meters into approximate degree offsets `(dx, dy)`
/// at the given reference latitude.
pub fn degree_buffer(meters: f64, ref_lat: f64) -> (f64, f64) {
    let dy = meters / DEGREE_TO_METERS;
    let dx = meters / (DEGREE_TO_METERS * ref_lat.to_radians().cos().max(MIN_COS_LAT));
    (dx, dy)
}

/// parses a coordinate string of the form `"(lon, lat)"`, as found in the
/// `origin` and `destination` columns of the unified dataset. surrounding
/// parentheses and quotes are stripped before splitting on the comma.
pub fn parse_coordinate(coord_str: &str) -> Result<Coord<f64>, String> {
    let trimmed = coord_str.trim().trim_matches(|c| c == '(' || c == ')' || c == '"');
    let (lon_str, lat_str) = trimmed
        .split_once(',')
        .ok_or_else(|| format!("coordinate '{}' is missing a comma separator", coord_str))?;
    let lon: f64 = lon_str
        .trim()
        .parse()
        .map_err(|e| format!("unable to parse longitude '{}': {}", lon_str.trim(), e))?;
    let lat: f64 = lat_str
        .trim()
        .parse()
        .map_err(|e| format!("unable to parse latitude '{}': {}", lat_str.trim(), e))?;
    Ok(Coord { x: lon, y: lat })
}

/// axis-aligned bounding box spanned by two coordinates.
pub fn endpoint_bbox(a: &Coord<f64>, b: &Coord<f64>) -> Rect<f64> {
    Rect::new(*a, *b)
}

/// expands a bounding box by `(dx, dy)` degrees on each side.
pub fn expand_rect(rect: &Rect<f64>, dx: f64, dy: f64) -> Rect<f64> {
    Rect::new(
        Coord {
            x: rect.min().x - dx,
            y: rect.min().y - dy,
        },
        Coord {
            x: rect.max().x + dx,
            y: rect.max().y + dy,
        },
    )
}
