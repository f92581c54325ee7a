mod algorithm;
mod app_error;
mod export;
mod geojson_ops;
mod response;
mod router;

pub use algorithm::Algorithm;
pub use app_error::AppError;
pub use export::export_route_geojson;
pub use geojson_ops::empty_feature_collection;
pub use response::{EdgeDetail, Performance, RouteResult, RouteStatistics};
pub use router::SafePathRouter;
