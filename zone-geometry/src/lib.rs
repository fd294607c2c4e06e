pub mod assignment;
pub mod clamp;
pub mod normalize;
pub mod overlap;
pub mod placement;
pub mod reposition;
pub mod templates;
pub mod units;
pub mod zone;

pub use assignment::{drop_item, find_zone_at_position, screen_to_zone, snap_rotation};
pub use clamp::{clamp_position, clamp_zone, enforce_min_size};
pub use normalize::{
    normalize_zones, normalize_zones_with_report, AcceptanceOrder, NormalizeReport,
    NormalizedLayout, NormalizerConfig, ZoneOutcome,
};
pub use overlap::{intersection_area, max_overlap_against, overlap_ratio};
pub use placement::{auto_place_furniture, FurnitureCatalog};
pub use reposition::{reposition, CANDIDATE_OFFSETS};
pub use templates::LayoutTemplate;
pub use units::{cm_to_px, meters_to_cm, percent_to_cm, px_to_cm, Canvas};
pub use zone::{FurnitureItem, Rect, Zone};
