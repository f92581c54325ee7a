//! SafePath application layer: the query facade over the core routing
//! engine, GeoJSON marshaling with boundary sanitization, the HTTP service,
//! and GeoJSON file export.

pub mod app;
pub mod server;
