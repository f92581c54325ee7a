use super::AppError;
use std::path::Path;

/// writes a `/route`-shaped GeoJSON document to the given path, creating
/// parent directories as needed.
pub fn export_route_geojson(document: &serde_json::Value, output_path: &Path) -> Result<(), AppError> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let text = serde_json::to_string_pretty(document)?;
    std::fs::write(output_path, text)?;
    log::info!("route exported to {}", output_path.display());
    Ok(())
}
