pub mod client;
pub mod ingest;
pub mod response;
pub mod schema;

pub use client::FloorplanAnalyzer;
pub use ingest::{canvas_from_dimensions, import_analysis, zones_to_cm, ImportedLayout};
pub use response::extract_json_from_response;
pub use schema::{parse_analysis, Dimensions, FloorplanAnalysis, ZoneSpec};
